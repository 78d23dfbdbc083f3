//! SQLite-backed profession store.
//!
//! Every operation opens its own connection, executes and returns; no
//! connection state is shared across calls. Schema creation is idempotent
//! and runs once at startup via [`SqliteProfessionStore::open`].

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::StorageError;
use crate::domain::entities::{ProfessionDetails, ProfessionMatch, ProfessionSummary, UserProfile};
use crate::domain::traits::{ProfessionStore, SearchFilter};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS professions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    interaction_level INTEGER CHECK (interaction_level BETWEEN 0 AND 2),
    education_level INTEGER CHECK (education_level BETWEEN 0 AND 3)
);

CREATE TABLE IF NOT EXISTS profession_categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profession_id INTEGER,
    category TEXT,
    FOREIGN KEY (profession_id) REFERENCES professions(id)
);

CREATE TABLE IF NOT EXISTS profession_requirements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profession_id INTEGER,
    requirement TEXT,
    FOREIGN KEY (profession_id) REFERENCES professions(id)
);

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    name TEXT,
    age INTEGER
);

CREATE TABLE IF NOT EXISTS users_feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    profession_id INTEGER,
    is_satisfied INTEGER CHECK (is_satisfied IN (0,1))
);
";

/// One profession entry from a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedProfession {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub interaction_level: i64,
    pub education_level: i64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

/// SQLite store for professions, tags, user profiles and feedback.
pub struct SqliteProfessionStore {
    path: PathBuf,
}

impl SqliteProfessionStore {
    /// Open (creating if needed) the database file and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Load seed entries from a YAML file and insert them.
    pub fn seed_from_file(&self, path: impl AsRef<Path>) -> Result<usize, StorageError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<SeedProfession> =
            serde_yaml::from_str(&content).map_err(|e| StorageError::SeedFile(e.to_string()))?;
        self.seed(&entries)
    }

    /// Insert professions with their tag rows, all in one transaction.
    pub fn seed(&self, entries: &[SeedProfession]) -> Result<usize, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        for entry in entries {
            tx.execute(
                "INSERT INTO professions (name, description, interaction_level, education_level)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.name,
                    entry.description,
                    entry.interaction_level,
                    entry.education_level
                ],
            )?;
            let profession_id = tx.last_insert_rowid();
            for category in &entry.categories {
                tx.execute(
                    "INSERT INTO profession_categories (profession_id, category) VALUES (?1, ?2)",
                    params![profession_id, category],
                )?;
            }
            for requirement in &entry.requirements {
                tx.execute(
                    "INSERT INTO profession_requirements (profession_id, requirement)
                     VALUES (?1, ?2)",
                    params![profession_id, requirement],
                )?;
            }
        }
        tx.commit()?;
        Ok(entries.len())
    }
}

impl ProfessionStore for SqliteProfessionStore {
    fn list_categories(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT category
             FROM profession_categories
             ORDER BY category",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut categories = Vec::new();
        for category in rows {
            categories.push(category?);
        }
        Ok(categories)
    }

    fn list_requirements(&self, category: &str) -> Result<Vec<String>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT requirement
             FROM profession_requirements
             WHERE profession_id IN (
                 SELECT profession_id
                 FROM profession_categories
                 WHERE category = ?1
             )",
        )?;
        let rows = stmt.query_map([category], |row| row.get(0))?;

        let mut requirements = Vec::new();
        for requirement in rows {
            requirements.push(requirement?);
        }
        Ok(requirements)
    }

    fn list_professions_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<ProfessionSummary>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name
             FROM professions p
             JOIN profession_categories c ON p.id = c.profession_id
             WHERE c.category = ?1",
        )?;
        let rows = stmt.query_map([category], |row| {
            Ok(ProfessionSummary {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut professions = Vec::new();
        for profession in rows {
            professions.push(profession?);
        }
        Ok(professions)
    }

    fn profession_details(&self, id: i64) -> Result<Option<ProfessionDetails>, StorageError> {
        let conn = self.connect()?;

        let base = conn
            .query_row(
                "SELECT id, name, description, interaction_level, education_level
                 FROM professions
                 WHERE id = ?1",
                [id],
                |row| {
                    Ok(ProfessionDetails {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        interaction_level: row.get(3)?,
                        education_level: row.get(4)?,
                        categories: Vec::new(),
                        requirements: Vec::new(),
                    })
                },
            )
            .optional()?;

        let Some(mut details) = base else {
            return Ok(None);
        };

        let mut stmt =
            conn.prepare("SELECT category FROM profession_categories WHERE profession_id = ?1")?;
        let rows = stmt.query_map([id], |row| row.get(0))?;
        for category in rows {
            details.categories.push(category?);
        }

        let mut stmt = conn
            .prepare("SELECT requirement FROM profession_requirements WHERE profession_id = ?1")?;
        let rows = stmt.query_map([id], |row| row.get(0))?;
        for requirement in rows {
            details.requirements.push(requirement?);
        }

        Ok(Some(details))
    }

    fn search_professions(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<ProfessionMatch>, StorageError> {
        let conn = self.connect()?;

        // Left joins keep untagged professions in play when the
        // corresponding filter is unset.
        let mut sql = String::from(
            "SELECT DISTINCT p.id, p.name, p.description
             FROM professions p
             LEFT JOIN profession_categories c ON p.id = c.profession_id
             LEFT JOIN profession_requirements r ON p.id = r.profession_id
             WHERE 1=1",
        );
        let mut values: Vec<Value> = Vec::new();

        if let Some(level) = filter.interaction_level {
            sql.push_str(" AND p.interaction_level = ?");
            values.push(Value::Integer(level));
        }
        if let Some(category) = &filter.category {
            sql.push_str(" AND c.category = ?");
            values.push(Value::Text(category.clone()));
        }
        if let Some(requirement) = &filter.requirement {
            sql.push_str(" AND r.requirement = ?");
            values.push(Value::Text(requirement.clone()));
        }
        if let Some(education_max) = filter.education_max {
            sql.push_str(" AND p.education_level <= ?");
            values.push(Value::Integer(education_max));
        }

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), |row| {
            Ok(ProfessionMatch {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?;

        let mut matches = Vec::new();
        for profession in rows {
            matches.push(profession?);
        }
        Ok(matches)
    }

    fn upsert_user(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT OR REPLACE INTO users (id, name, age) VALUES (?1, ?2, ?3)",
            params![profile.id, profile.name, profile.age],
        )?;
        Ok(())
    }

    fn record_feedback(
        &self,
        user_id: i64,
        profession_id: i64,
        satisfied: bool,
    ) -> Result<(), StorageError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO users_feedback (user_id, profession_id, is_satisfied)
             VALUES (?1, ?2, ?3)",
            params![user_id, profession_id, satisfied as i64],
        )?;
        Ok(())
    }
}
