//! Source connection form and status

use schemaport_core::{ConsoleError, ConsoleResult, DbSystem, Validatable};

/// Fields of the connection form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionForm {
    pub system: Option<DbSystem>,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    /// Database (service name for Oracle)
    pub database: String,
}

impl ConnectionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the system, moving the port along with it unless the user typed one
    pub fn set_system(&mut self, system: Option<DbSystem>) {
        let previous_default = self.system.map(|s| s.default_port().to_string());
        if self.port.is_empty() || previous_default.as_deref() == Some(self.port.as_str()) {
            self.port = system.map(|s| s.default_port().to_string()).unwrap_or_default();
        }
        self.system = system;
    }

    /// Endpoint the form is posted to
    pub fn endpoint(&self) -> &'static str {
        DbSystem::connect_endpoint(self.system)
    }

    /// Form-encoded fields, in the order the server reads them
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "db_system",
                self.system.map(|s| s.as_str().to_string()).unwrap_or_default(),
            ),
            ("host", self.host.trim().to_string()),
            ("port", self.port.trim().to_string()),
            ("username", self.username.clone()),
            ("password", self.password.clone()),
            ("database", self.database.trim().to_string()),
        ]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Validatable for ConnectionForm {
    fn validate(&self) -> ConsoleResult<()> {
        if self.system.is_none() {
            return Err(ConsoleError::missing(["a database system"]));
        }
        if self.host.trim().is_empty() {
            return Err(ConsoleError::validation("Host is required."));
        }
        if self.port.trim().parse::<u16>().is_err() {
            return Err(ConsoleError::validation(format!(
                "Port must be a number between 0 and 65535, got '{}'.",
                self.port.trim()
            )));
        }
        Ok(())
    }
}

/// Whether the console is attached to a source database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected {
        system: DbSystem,
        database: String,
    },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }

    /// Short description for the status line
    pub fn describe(&self) -> String {
        match self {
            ConnectionStatus::Disconnected => "Not connected".to_string(),
            ConnectionStatus::Connecting => "Connecting...".to_string(),
            ConnectionStatus::Connected { system, database } if database.is_empty() => {
                format!("Connected to {}", system)
            }
            ConnectionStatus::Connected { system, database } => {
                format!("Connected to {} ({})", system, database)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> ConnectionForm {
        let mut form = ConnectionForm::new();
        form.set_system(Some(DbSystem::PostgreSql));
        form.host = " db.internal ".to_string();
        form.username = "reader".to_string();
        form.password = "secret".to_string();
        form.database = "sales".to_string();
        form
    }

    #[test]
    fn test_port_follows_system_until_edited() {
        let mut form = ConnectionForm::new();
        form.set_system(Some(DbSystem::MySql));
        assert_eq!(form.port, "3306");
        form.set_system(Some(DbSystem::SqlServer));
        assert_eq!(form.port, "1433");

        form.port = "14330".to_string();
        form.set_system(Some(DbSystem::Oracle));
        assert_eq!(form.port, "14330");
    }

    #[test]
    fn test_form_pairs() {
        let form = filled();
        assert_eq!(form.endpoint(), "/connect_postgres");
        assert_eq!(
            form.form_pairs(),
            vec![
                ("db_system", "postgresql".to_string()),
                ("host", "db.internal".to_string()),
                ("port", "5432".to_string()),
                ("username", "reader".to_string()),
                ("password", "secret".to_string()),
                ("database", "sales".to_string()),
            ]
        );
    }

    #[test]
    fn test_validation() {
        assert!(filled().is_valid());

        let err = ConnectionForm::new().validate().unwrap_err();
        assert_eq!(err.to_string(), "Please select a database system.");

        let mut form = filled();
        form.host.clear();
        assert!(form.validate().unwrap_err().is_validation());

        let mut form = filled();
        form.port = "fivefourthreetwo".to_string();
        assert!(form.validate().unwrap_err().to_string().contains("fivefourthreetwo"));
    }

    #[test]
    fn test_status_description() {
        let status = ConnectionStatus::Connected {
            system: DbSystem::MySql,
            database: "shop".to_string(),
        };
        assert!(status.is_connected());
        assert_eq!(status.describe(), "Connected to MySQL (shop)");
        assert_eq!(ConnectionStatus::default().describe(), "Not connected");
    }
}
