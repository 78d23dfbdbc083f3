use clap::{Parser, Subcommand};

use profgid_bot::application::messaging::EventParser;
use profgid_bot::application::services::ConversationService;
use profgid_bot::domain::entities::{Action, Event, Keyboard};
use profgid_bot::domain::traits::Bot;
use profgid_bot::infrastructure::adapters::console::ConsoleAdapter;
use profgid_bot::infrastructure::adapters::telegram::{TelegramAdapter, Update};
use profgid_bot::infrastructure::config::Config;
use profgid_bot::infrastructure::database::SqliteProfessionStore;

#[derive(Parser)]
#[command(name = "profgid-bot")]
#[command(about = "Career guidance chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
    /// Load professions from a YAML seed file
    Seed {
        /// Seed file path
        #[arg(short, long)]
        file: String,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_bot(cli.config, cli.token);
        }
        Commands::Version => {
            println!("profgid-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
        Commands::Seed { file } => {
            seed_database(&cli.config, &file);
        }
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

fn init_config(config_path: &str) {
    match Config::default().save(config_path) {
        Ok(()) => tracing::info!("Wrote default config to {}", config_path),
        Err(e) => tracing::error!("Failed to write config: {}", e),
    }
}

fn seed_database(config_path: &str, seed_file: &str) {
    let config = load_config(config_path);
    let store = match SqliteProfessionStore::open(&config.database.path) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            return;
        }
    };
    match store.seed_from_file(seed_file) {
        Ok(count) => tracing::info!("Seeded {} professions from {}", count, seed_file),
        Err(e) => tracing::error!("Failed to seed database: {}", e),
    }
}

fn run_bot(config_path: String, token_override: Option<String>) {
    let config = load_config(&config_path);
    tracing::info!("Starting profgid-bot: {}", config.bot.name);

    let store = match SqliteProfessionStore::open(&config.database.path) {
        Ok(store) => {
            tracing::info!("Database initialized");
            store
        }
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let mut conversations = ConversationService::new(store);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return;
        }
    };

    if let Some(token) = config.telegram_token(token_override) {
        rt.block_on(async {
            run_telegram_bot(token, &mut conversations).await;
        });
    } else {
        // Run console bot (dev mode)
        rt.block_on(async {
            run_console_bot(&mut conversations).await;
        });
    }
}

async fn run_telegram_bot(
    token: String,
    conversations: &mut ConversationService<SqliteProfessionStore>,
) {
    let mut bot = TelegramAdapter::new(token);

    if let Err(e) = bot.fetch_bot_info().await {
        tracing::error!("Failed to fetch bot info: {}", e);
        return;
    }
    tracing::info!("Bot started: @{}", bot.bot_info().username);

    let parser = EventParser::new();
    let mut offset: i64 = 0;
    let timeout_seconds = 30;

    tracing::info!("Starting update loop...");

    loop {
        match bot.get_updates(offset, timeout_seconds).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    tracing::info!("Received {} updates", updates.len());
                }
                for update in &updates {
                    if let Some((user_id, chat_id, event)) = extract_event(update, &parser) {
                        let actions = conversations.handle(user_id, &event);
                        dispatch_actions(&bot, &chat_id, actions).await;
                    }
                }
                if let Some(next) = TelegramAdapter::next_offset(&updates) {
                    offset = next;
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
            }
        }
    }
}

/// Map one Telegram update onto (user id, chat id, event). Updates without
/// a sender or text payload are skipped.
fn extract_event(update: &Update, parser: &EventParser) -> Option<(i64, String, Event)> {
    if let Some(msg) = &update.message {
        let user_id = msg.from.as_ref().map(|u| u.id)?;
        let text = msg.text.as_deref()?;
        return Some((user_id, msg.chat.id.to_string(), parser.parse_text(text)));
    }

    if let Some(cb) = &update.callback_query {
        let payload = cb.data.clone()?;
        let chat_id = cb
            .message
            .as_ref()
            .map(|m| m.chat.id.to_string())
            .unwrap_or_else(|| cb.from.id.to_string());
        let message_id = cb.message.as_ref().map(|m| m.message_id);
        return Some((
            cb.from.id,
            chat_id,
            Event::Callback {
                callback_id: cb.id.clone(),
                message_id,
                payload,
            },
        ));
    }

    None
}

async fn dispatch_actions<B: Bot>(bot: &B, chat_id: &str, actions: Vec<Action>) {
    for action in actions {
        match action {
            Action::Send { text, keyboard } => {
                let result = match keyboard {
                    Keyboard::None => bot.send_message(chat_id, &text).await,
                    Keyboard::Choices(choices) => {
                        bot.send_with_choices(chat_id, &text, &choices).await
                    }
                    Keyboard::Inline(rows) => bot.send_with_inline(chat_id, &text, &rows).await,
                };
                if let Err(e) = result {
                    tracing::error!("Failed to send message: {}", e);
                }
            }
            Action::AnswerCallback { callback_id, text } => {
                if let Err(e) = bot.answer_callback(&callback_id, text.as_deref()).await {
                    tracing::error!("Failed to answer callback: {}", e);
                }
            }
            Action::ClearInlineKeyboard { message_id } => {
                // Failed retractions are ignored.
                let _ = bot.clear_inline_keyboard(chat_id, message_id).await;
            }
        }
    }
}

async fn run_console_bot(conversations: &mut ConversationService<SqliteProfessionStore>) {
    const CONSOLE_USER: i64 = 0;

    let bot = ConsoleAdapter::new();
    let parser = EventParser::new();

    tracing::info!("Console mode. Type /start to begin, `cb <payload>` to press a button, Ctrl-D to exit.");

    loop {
        let Some(line) = bot.read_line("> ").await else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let event = if let Some(payload) = line.strip_prefix("cb ") {
            Event::Callback {
                callback_id: "console".to_string(),
                message_id: None,
                payload: payload.to_string(),
            }
        } else {
            parser.parse_text(&line)
        };

        let actions = conversations.handle(CONSOLE_USER, &event);
        dispatch_actions(&bot, "console", actions).await;
    }
}
