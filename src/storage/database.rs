//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2
//! connection pooling. This is the entity store adapter the conversation
//! engine depends on: narrow CRUD operations keyed by id and organization
//! id. The organization scope is a mandatory parameter on every query, not
//! an optional filter — the one exception is the global skill taxonomy.

use chrono::Utc;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use uuid::Uuid;

use guildhall_tools::{
    ClientInput, PersonInput, ProjectInput, RetrospectiveInput, UpdatePersonInput,
    UpdateProjectInput, UpdateRetrospectiveInput,
};

use crate::models::{
    Client, Conversation, ConversationStatus, MessageRole, Organization, Person, PersonSkill,
    Phase, Project, Retrospective, Skill, StoredMessage, User,
};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::database_path;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn to_json_text(value: &Option<Vec<String>>) -> Option<String> {
    value
        .as_ref()
        .and_then(|v| serde_json::to_string(v).ok())
}

fn from_json_text(value: Option<String>) -> Option<Vec<String>> {
    value.and_then(|raw| serde_json::from_str(&raw).ok())
}

impl Database {
    /// Create a database from an existing connection pool.
    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        Self::from_pool(pool)
    }

    /// Create a new database instance with connection pooling
    pub fn new() -> AppResult<Self> {
        let db_path = database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        Self::from_pool(pool)
    }

    /// Get a pooled connection
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Check database health
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.get_connection() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS organizations (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                external_id TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL,
                organization_id TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'member',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (organization_id) REFERENCES organizations(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                organization_id TEXT NOT NULL,
                name TEXT NOT NULL,
                industry TEXT,
                size_tier TEXT,
                website_url TEXT,
                notes TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (organization_id) REFERENCES organizations(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_clients_org ON clients(organization_id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                organization_id TEXT NOT NULL,
                client_id TEXT,
                name TEXT NOT NULL,
                description TEXT,
                project_type TEXT,
                status TEXT NOT NULL DEFAULT 'draft',
                estimated_hours REAL,
                start_date TEXT,
                end_date TEXT,
                tags TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (organization_id) REFERENCES organizations(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_projects_org ON projects(organization_id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS phases (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                name TEXT NOT NULL,
                estimated_hours REAL NOT NULL,
                sort_order INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'planned',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS people (
                id TEXT PRIMARY KEY,
                organization_id TEXT NOT NULL,
                name TEXT NOT NULL,
                person_type TEXT NOT NULL,
                email TEXT,
                location TEXT,
                hourly_rate REAL,
                currency TEXT NOT NULL DEFAULT 'USD',
                availability_status TEXT NOT NULL DEFAULT 'available',
                rating REAL,
                notes TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (organization_id) REFERENCES organizations(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_people_org ON people(organization_id)",
            [],
        )?;

        // Global reference data: deliberately no organization column
        conn.execute(
            "CREATE TABLE IF NOT EXISTS skills (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                category TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS person_skills (
                person_id TEXT NOT NULL,
                skill_id TEXT NOT NULL,
                proficiency_level INTEGER NOT NULL,
                years_experience REAL,
                PRIMARY KEY (person_id, skill_id),
                FOREIGN KEY (person_id) REFERENCES people(id) ON DELETE CASCADE,
                FOREIGN KEY (skill_id) REFERENCES skills(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS retrospectives (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                completed_at TEXT,
                hours_variance_pct REAL,
                cost_variance_pct REAL,
                scope_changes_count INTEGER NOT NULL DEFAULT 0,
                client_satisfaction REAL,
                what_worked TEXT,
                what_didnt TEXT,
                lessons TEXT,
                would_repeat INTEGER,
                tags TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS conversations (
                id TEXT PRIMARY KEY,
                organization_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                target_schema TEXT,
                intent TEXT,
                status TEXT NOT NULL DEFAULT 'active',
                extracted_data TEXT NOT NULL DEFAULT '{}',
                created_entities TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (organization_id) REFERENCES organizations(id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_conversations_org ON conversations(organization_id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                conversation_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                metadata TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (conversation_id) REFERENCES conversations(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_conversation
             ON messages(conversation_id, created_at)",
            [],
        )?;

        Ok(())
    }

    // ========================================================================
    // Organization and User Operations
    // ========================================================================

    /// Insert a new organization
    pub fn insert_organization(&self, name: &str, slug: &str) -> AppResult<Organization> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        conn.execute(
            "INSERT INTO organizations (id, name, slug, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, 'active', ?4, ?4)",
            params![id, name, slug, ts],
        )?;
        Ok(Organization {
            id,
            name: name.to_string(),
            slug: slug.to_string(),
            status: "active".to_string(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Insert a new user
    pub fn insert_user(
        &self,
        external_id: &str,
        email: &str,
        organization_id: &str,
        role: &str,
    ) -> AppResult<User> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        conn.execute(
            "INSERT INTO users (id, external_id, email, organization_id, role, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![id, external_id, email, organization_id, role, ts],
        )?;
        Ok(User {
            id,
            external_id: external_id.to_string(),
            email: email.to_string(),
            organization_id: organization_id.to_string(),
            role: role.to_string(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Look up a user by the external auth provider's identity
    pub fn get_user_by_external_id(&self, external_id: &str) -> AppResult<Option<User>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, external_id, email, organization_id, role, created_at, updated_at
             FROM users WHERE external_id = ?1",
            params![external_id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    email: row.get(2)?,
                    organization_id: row.get(3)?,
                    role: row.get(4)?,
                    created_at: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        );

        match result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    // ========================================================================
    // Client Operations
    // ========================================================================

    /// Insert a new client scoped to an organization
    pub fn insert_client(&self, organization_id: &str, input: &ClientInput) -> AppResult<Client> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        let size_tier = input.size_tier.map(|t| t.as_str().to_string());
        conn.execute(
            "INSERT INTO clients (id, organization_id, name, industry, size_tier, website_url, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                id,
                organization_id,
                input.name,
                input.industry,
                size_tier,
                input.website_url,
                input.notes,
                ts
            ],
        )?;
        Ok(Client {
            id,
            organization_id: organization_id.to_string(),
            name: input.name.clone(),
            industry: input.industry.clone(),
            size_tier,
            website_url: input.website_url.clone(),
            notes: input.notes.clone(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Get a client by id within an organization
    pub fn get_client(&self, id: &str, organization_id: &str) -> AppResult<Option<Client>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, organization_id, name, industry, size_tier, website_url, notes, created_at, updated_at
             FROM clients WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id],
            Self::row_to_client,
        );

        match result {
            Ok(client) => Ok(Some(client)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// List all clients for an organization, most recent first
    pub fn list_clients(&self, organization_id: &str) -> AppResult<Vec<Client>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, organization_id, name, industry, size_tier, website_url, notes, created_at, updated_at
             FROM clients WHERE organization_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map(params![organization_id], Self::row_to_client)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn row_to_client(row: &rusqlite::Row) -> rusqlite::Result<Client> {
        Ok(Client {
            id: row.get(0)?,
            organization_id: row.get(1)?,
            name: row.get(2)?,
            industry: row.get(3)?,
            size_tier: row.get(4)?,
            website_url: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    // ========================================================================
    // Project Operations
    // ========================================================================

    /// Insert a new project scoped to an organization.
    ///
    /// Status is forced to 'draft' regardless of input; inline phases are
    /// the caller's responsibility (see `insert_phases`).
    pub fn insert_project(
        &self,
        organization_id: &str,
        input: &ProjectInput,
    ) -> AppResult<Project> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        let project_type = input.project_type.map(|t| t.as_str().to_string());
        let tags = to_json_text(&input.tags);
        conn.execute(
            "INSERT INTO projects (id, organization_id, client_id, name, description, project_type,
                                   status, estimated_hours, start_date, end_date, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'draft', ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                id,
                organization_id,
                input.client_id,
                input.name,
                input.description,
                project_type,
                input.estimated_hours,
                input.start_date,
                input.end_date,
                tags,
                ts
            ],
        )?;
        Ok(Project {
            id,
            organization_id: organization_id.to_string(),
            client_id: input.client_id.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            project_type,
            status: "draft".to_string(),
            estimated_hours: input.estimated_hours,
            start_date: input.start_date.clone(),
            end_date: input.end_date.clone(),
            tags: input.tags.clone(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Get a project by id within an organization
    pub fn get_project(&self, id: &str, organization_id: &str) -> AppResult<Option<Project>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, organization_id, client_id, name, description, project_type, status,
                    estimated_hours, start_date, end_date, tags, created_at, updated_at
             FROM projects WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id],
            Self::row_to_project,
        );

        match result {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Partially update a project within an organization. Only provided
    /// fields change. Returns None when the id is absent or out of scope.
    pub fn update_project(
        &self,
        organization_id: &str,
        input: &UpdateProjectInput,
    ) -> AppResult<Option<Project>> {
        let conn = self.get_connection()?;
        let project_type = input.project_type.map(|t| t.as_str().to_string());
        let status = input.status.map(|s| s.as_str().to_string());
        let tags = to_json_text(&input.tags);
        let affected = conn.execute(
            "UPDATE projects SET
                name = COALESCE(?3, name),
                description = COALESCE(?4, description),
                project_type = COALESCE(?5, project_type),
                status = COALESCE(?6, status),
                estimated_hours = COALESCE(?7, estimated_hours),
                start_date = COALESCE(?8, start_date),
                end_date = COALESCE(?9, end_date),
                tags = COALESCE(?10, tags),
                updated_at = ?11
             WHERE id = ?1 AND organization_id = ?2",
            params![
                input.project_id,
                organization_id,
                input.name,
                input.description,
                project_type,
                status,
                input.estimated_hours,
                input.start_date,
                input.end_date,
                tags,
                now()
            ],
        )?;
        if affected == 0 {
            return Ok(None);
        }
        drop(conn);
        self.get_project(&input.project_id, organization_id)
    }

    fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        Ok(Project {
            id: row.get(0)?,
            organization_id: row.get(1)?,
            client_id: row.get(2)?,
            name: row.get(3)?,
            description: row.get(4)?,
            project_type: row.get(5)?,
            status: row.get(6)?,
            estimated_hours: row.get(7)?,
            start_date: row.get(8)?,
            end_date: row.get(9)?,
            tags: from_json_text(row.get(10)?),
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    // ========================================================================
    // Phase Operations
    // ========================================================================

    /// Insert phases for a project, ordered as given
    pub fn insert_phases(
        &self,
        project_id: &str,
        phases: &[guildhall_tools::PhaseInput],
    ) -> AppResult<()> {
        let conn = self.get_connection()?;
        let ts = now();
        for (index, phase) in phases.iter().enumerate() {
            conn.execute(
                "INSERT INTO phases (id, project_id, name, estimated_hours, sort_order, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 'planned', ?6)",
                params![
                    new_id(),
                    project_id,
                    phase.name,
                    phase.estimated_hours,
                    index as i64,
                    ts
                ],
            )?;
        }
        Ok(())
    }

    /// List a project's phases in sort order
    pub fn list_phases(&self, project_id: &str) -> AppResult<Vec<Phase>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, name, estimated_hours, sort_order, status, created_at
             FROM phases WHERE project_id = ?1 ORDER BY sort_order ASC",
        )?;
        let rows = stmt
            .query_map(params![project_id], |row| {
                Ok(Phase {
                    id: row.get(0)?,
                    project_id: row.get(1)?,
                    name: row.get(2)?,
                    estimated_hours: row.get(3)?,
                    sort_order: row.get(4)?,
                    status: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    // ========================================================================
    // Person and Skill Operations
    // ========================================================================

    /// Insert a new person scoped to an organization. Skill links are the
    /// caller's responsibility (see `insert_person_skill`).
    pub fn insert_person(&self, organization_id: &str, input: &PersonInput) -> AppResult<Person> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        let person_type = input.person_type.as_str();
        let availability = input.availability_status.as_str();
        conn.execute(
            "INSERT INTO people (id, organization_id, name, person_type, email, location,
                                 hourly_rate, currency, availability_status, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                id,
                organization_id,
                input.name,
                person_type,
                input.email,
                input.location,
                input.hourly_rate,
                input.currency,
                availability,
                input.notes,
                ts
            ],
        )?;
        Ok(Person {
            id,
            organization_id: organization_id.to_string(),
            name: input.name.clone(),
            person_type: person_type.to_string(),
            email: input.email.clone(),
            location: input.location.clone(),
            hourly_rate: input.hourly_rate,
            currency: input.currency.clone(),
            availability_status: availability.to_string(),
            rating: None,
            notes: input.notes.clone(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Get a person by id within an organization
    pub fn get_person(&self, id: &str, organization_id: &str) -> AppResult<Option<Person>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, organization_id, name, person_type, email, location, hourly_rate,
                    currency, availability_status, rating, notes, created_at, updated_at
             FROM people WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id],
            Self::row_to_person,
        );

        match result {
            Ok(person) => Ok(Some(person)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Partially update a person within an organization
    pub fn update_person(
        &self,
        organization_id: &str,
        input: &UpdatePersonInput,
    ) -> AppResult<Option<Person>> {
        let conn = self.get_connection()?;
        let person_type = input.person_type.map(|t| t.as_str().to_string());
        let availability = input.availability_status.map(|a| a.as_str().to_string());
        let affected = conn.execute(
            "UPDATE people SET
                name = COALESCE(?3, name),
                person_type = COALESCE(?4, person_type),
                email = COALESCE(?5, email),
                location = COALESCE(?6, location),
                hourly_rate = COALESCE(?7, hourly_rate),
                currency = COALESCE(?8, currency),
                availability_status = COALESCE(?9, availability_status),
                rating = COALESCE(?10, rating),
                notes = COALESCE(?11, notes),
                updated_at = ?12
             WHERE id = ?1 AND organization_id = ?2",
            params![
                input.person_id,
                organization_id,
                input.name,
                person_type,
                input.email,
                input.location,
                input.hourly_rate,
                input.currency,
                availability,
                input.rating,
                input.notes,
                now()
            ],
        )?;
        if affected == 0 {
            return Ok(None);
        }
        drop(conn);
        self.get_person(&input.person_id, organization_id)
    }

    fn row_to_person(row: &rusqlite::Row) -> rusqlite::Result<Person> {
        Ok(Person {
            id: row.get(0)?,
            organization_id: row.get(1)?,
            name: row.get(2)?,
            person_type: row.get(3)?,
            email: row.get(4)?,
            location: row.get(5)?,
            hourly_rate: row.get(6)?,
            currency: row.get(7)?,
            availability_status: row.get(8)?,
            rating: row.get(9)?,
            notes: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    /// Insert a skill into the global taxonomy
    pub fn insert_skill(&self, name: &str, category: Option<&str>) -> AppResult<Skill> {
        let conn = self.get_connection()?;
        let id = new_id();
        conn.execute(
            "INSERT INTO skills (id, name, category) VALUES (?1, ?2, ?3)",
            params![id, name, category],
        )?;
        Ok(Skill {
            id,
            name: name.to_string(),
            category: category.map(String::from),
        })
    }

    /// Case-insensitive skill lookup by name. The skill taxonomy is global
    /// reference data, so this query carries no organization scope.
    pub fn find_skill_by_name(&self, name: &str) -> AppResult<Option<Skill>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, name, category FROM skills WHERE name = ?1 COLLATE NOCASE",
            params![name],
            |row| {
                Ok(Skill {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    category: row.get(2)?,
                })
            },
        );

        match result {
            Ok(skill) => Ok(Some(skill)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Link a skill to a person
    pub fn insert_person_skill(&self, link: &PersonSkill) -> AppResult<()> {
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO person_skills (person_id, skill_id, proficiency_level, years_experience)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                link.person_id,
                link.skill_id,
                link.proficiency_level,
                link.years_experience
            ],
        )?;
        Ok(())
    }

    /// List a person's skill links
    pub fn list_person_skills(&self, person_id: &str) -> AppResult<Vec<PersonSkill>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT person_id, skill_id, proficiency_level, years_experience
             FROM person_skills WHERE person_id = ?1",
        )?;
        let rows = stmt
            .query_map(params![person_id], |row| {
                Ok(PersonSkill {
                    person_id: row.get(0)?,
                    skill_id: row.get(1)?,
                    proficiency_level: row.get(2)?,
                    years_experience: row.get(3)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    // ========================================================================
    // Retrospective Operations
    // ========================================================================

    /// Insert a retrospective for a project. Ownership of the project must
    /// be verified by the caller before this runs; retrospectives are scoped
    /// through their parent project.
    pub fn insert_retrospective(
        &self,
        project_id: &str,
        input: &RetrospectiveInput,
    ) -> AppResult<Retrospective> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        let lessons = to_json_text(&input.lessons);
        let tags = to_json_text(&input.tags);
        conn.execute(
            "INSERT INTO retrospectives (id, project_id, completed_at, hours_variance_pct,
                                         cost_variance_pct, scope_changes_count, client_satisfaction,
                                         what_worked, what_didnt, lessons, would_repeat, tags,
                                         created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
            params![
                id,
                project_id,
                ts,
                input.hours_variance_pct,
                input.cost_variance_pct,
                input.scope_changes_count,
                input.client_satisfaction,
                input.what_worked,
                input.what_didnt,
                lessons,
                input.would_repeat,
                tags,
                ts
            ],
        )?;
        Ok(Retrospective {
            id,
            project_id: project_id.to_string(),
            completed_at: Some(ts.clone()),
            hours_variance_pct: input.hours_variance_pct,
            cost_variance_pct: input.cost_variance_pct,
            scope_changes_count: input.scope_changes_count,
            client_satisfaction: input.client_satisfaction,
            what_worked: input.what_worked.clone(),
            what_didnt: input.what_didnt.clone(),
            lessons: input.lessons.clone(),
            would_repeat: input.would_repeat,
            tags: input.tags.clone(),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Get a retrospective by id. Unscoped by design: callers walk the
    /// parent project to verify organization ownership before acting.
    pub fn get_retrospective(&self, id: &str) -> AppResult<Option<Retrospective>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, project_id, completed_at, hours_variance_pct, cost_variance_pct,
                    scope_changes_count, client_satisfaction, what_worked, what_didnt,
                    lessons, would_repeat, tags, created_at, updated_at
             FROM retrospectives WHERE id = ?1",
            params![id],
            Self::row_to_retrospective,
        );

        match result {
            Ok(retro) => Ok(Some(retro)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// Partially update a retrospective. Ownership must already be verified
    /// via the parent project.
    pub fn update_retrospective(
        &self,
        input: &UpdateRetrospectiveInput,
    ) -> AppResult<Option<Retrospective>> {
        let conn = self.get_connection()?;
        let lessons = to_json_text(&input.lessons);
        let tags = to_json_text(&input.tags);
        let affected = conn.execute(
            "UPDATE retrospectives SET
                hours_variance_pct = COALESCE(?2, hours_variance_pct),
                cost_variance_pct = COALESCE(?3, cost_variance_pct),
                scope_changes_count = COALESCE(?4, scope_changes_count),
                client_satisfaction = COALESCE(?5, client_satisfaction),
                what_worked = COALESCE(?6, what_worked),
                what_didnt = COALESCE(?7, what_didnt),
                lessons = COALESCE(?8, lessons),
                would_repeat = COALESCE(?9, would_repeat),
                tags = COALESCE(?10, tags),
                updated_at = ?11
             WHERE id = ?1",
            params![
                input.retrospective_id,
                input.hours_variance_pct,
                input.cost_variance_pct,
                input.scope_changes_count,
                input.client_satisfaction,
                input.what_worked,
                input.what_didnt,
                lessons,
                input.would_repeat,
                tags,
                now()
            ],
        )?;
        if affected == 0 {
            return Ok(None);
        }
        drop(conn);
        self.get_retrospective(&input.retrospective_id)
    }

    /// List retrospectives for a project
    pub fn list_retrospectives(&self, project_id: &str) -> AppResult<Vec<Retrospective>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, project_id, completed_at, hours_variance_pct, cost_variance_pct,
                    scope_changes_count, client_satisfaction, what_worked, what_didnt,
                    lessons, would_repeat, tags, created_at, updated_at
             FROM retrospectives WHERE project_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map(params![project_id], Self::row_to_retrospective)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    fn row_to_retrospective(row: &rusqlite::Row) -> rusqlite::Result<Retrospective> {
        Ok(Retrospective {
            id: row.get(0)?,
            project_id: row.get(1)?,
            completed_at: row.get(2)?,
            hours_variance_pct: row.get(3)?,
            cost_variance_pct: row.get(4)?,
            scope_changes_count: row.get(5)?,
            client_satisfaction: row.get(6)?,
            what_worked: row.get(7)?,
            what_didnt: row.get(8)?,
            lessons: from_json_text(row.get(9)?),
            would_repeat: row.get(10)?,
            tags: from_json_text(row.get(11)?),
            created_at: row.get(12)?,
            updated_at: row.get(13)?,
        })
    }

    // ========================================================================
    // Conversation Operations
    // ========================================================================

    /// Insert a new active conversation
    pub fn insert_conversation(
        &self,
        organization_id: &str,
        user_id: &str,
        target_schema: Option<&str>,
        intent: Option<&str>,
    ) -> AppResult<Conversation> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        conn.execute(
            "INSERT INTO conversations (id, organization_id, user_id, target_schema, intent,
                                        status, extracted_data, created_entities, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, 'active', '{}', '{}', ?6, ?6)",
            params![id, organization_id, user_id, target_schema, intent, ts],
        )?;
        Ok(Conversation {
            id,
            organization_id: organization_id.to_string(),
            user_id: user_id.to_string(),
            target_schema: target_schema.map(String::from),
            intent: intent.map(String::from),
            status: ConversationStatus::Active,
            extracted_data: serde_json::json!({}),
            created_entities: serde_json::json!({}),
            created_at: ts.clone(),
            updated_at: ts,
        })
    }

    /// Get a conversation by id within an organization
    pub fn get_conversation(
        &self,
        id: &str,
        organization_id: &str,
    ) -> AppResult<Option<Conversation>> {
        let conn = self.get_connection()?;
        let result = conn.query_row(
            "SELECT id, organization_id, user_id, target_schema, intent, status,
                    extracted_data, created_entities, created_at, updated_at
             FROM conversations WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id],
            Self::row_to_conversation,
        );

        match result {
            Ok(conversation) => Ok(Some(conversation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::database(e.to_string())),
        }
    }

    /// List conversations for an organization, most recent first
    pub fn list_conversations(&self, organization_id: &str) -> AppResult<Vec<Conversation>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, organization_id, user_id, target_schema, intent, status,
                    extracted_data, created_entities, created_at, updated_at
             FROM conversations WHERE organization_id = ?1 ORDER BY created_at DESC",
        )?;
        let rows = stmt
            .query_map(params![organization_id], Self::row_to_conversation)?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }

    /// Update a conversation's lifecycle status
    pub fn update_conversation_status(
        &self,
        id: &str,
        organization_id: &str,
        status: ConversationStatus,
    ) -> AppResult<()> {
        let conn = self.get_connection()?;
        let affected = conn.execute(
            "UPDATE conversations SET status = ?3, updated_at = ?4
             WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id, status.as_str(), now()],
        )?;
        if affected == 0 {
            return Err(AppError::not_found(format!("Conversation {}", id)));
        }
        Ok(())
    }

    /// Replace a conversation's accumulated created-entities map
    pub fn update_conversation_created_entities(
        &self,
        id: &str,
        organization_id: &str,
        created_entities: &serde_json::Value,
    ) -> AppResult<()> {
        let conn = self.get_connection()?;
        let affected = conn.execute(
            "UPDATE conversations SET created_entities = ?3, updated_at = ?4
             WHERE id = ?1 AND organization_id = ?2",
            params![id, organization_id, created_entities.to_string(), now()],
        )?;
        if affected == 0 {
            return Err(AppError::not_found(format!("Conversation {}", id)));
        }
        Ok(())
    }

    fn row_to_conversation(row: &rusqlite::Row) -> rusqlite::Result<Conversation> {
        let status: String = row.get(5)?;
        let extracted_data: String = row.get(6)?;
        let created_entities: String = row.get(7)?;
        Ok(Conversation {
            id: row.get(0)?,
            organization_id: row.get(1)?,
            user_id: row.get(2)?,
            target_schema: row.get(3)?,
            intent: row.get(4)?,
            status: ConversationStatus::from_str(&status),
            extracted_data: serde_json::from_str(&extracted_data)
                .unwrap_or(serde_json::Value::Null),
            created_entities: serde_json::from_str(&created_entities)
                .unwrap_or(serde_json::Value::Null),
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    // ========================================================================
    // Message Operations
    // ========================================================================

    /// Append a message to a conversation. Message rows are append-only.
    pub fn insert_message(
        &self,
        conversation_id: &str,
        role: MessageRole,
        content: &str,
        metadata: Option<&serde_json::Value>,
    ) -> AppResult<StoredMessage> {
        let conn = self.get_connection()?;
        let id = new_id();
        let ts = now();
        let metadata_text = metadata.map(|m| m.to_string());
        conn.execute(
            "INSERT INTO messages (id, conversation_id, role, content, metadata, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, conversation_id, role.as_str(), content, metadata_text, ts],
        )?;
        Ok(StoredMessage {
            id,
            conversation_id: conversation_id.to_string(),
            role,
            content: content.to_string(),
            metadata: metadata.cloned(),
            created_at: ts,
        })
    }

    /// List a conversation's messages oldest first. rowid breaks creation
    /// time ties so same-turn pairs keep their insert order.
    pub fn list_messages(&self, conversation_id: &str) -> AppResult<Vec<StoredMessage>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, role, content, metadata, created_at
             FROM messages WHERE conversation_id = ?1
             ORDER BY created_at ASC, rowid ASC",
        )?;
        let rows = stmt
            .query_map(params![conversation_id], |row| {
                let role: String = row.get(2)?;
                let metadata: Option<String> = row.get(4)?;
                Ok(StoredMessage {
                    id: row.get(0)?,
                    conversation_id: row.get(1)?,
                    role: MessageRole::from_str(&role),
                    content: row.get(3)?,
                    metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
                    created_at: row.get(5)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}
