use crate::Result;
use testcontainers::core::{CopyDataSource, IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_PORT: u16 = 3306;
const INIT_SCRIPT_PATH: &str = "/docker-entrypoint-initdb.d/00-schema.sql";

#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "tinylink".to_string())]
    database: String,
    #[builder(default = "tinylink".to_string())]
    username: String,
    #[builder(default = "tinylink".to_string())]
    password: String,
    #[builder(default = "8.4".to_string())]
    tag: String,
    /// DDL run against `database` while the server initialises.
    #[builder(default, setter(into, strip_option))]
    schema: Option<String>,
}

/// Test fixture for a disposable MySQL server.
///
/// When a schema is configured it is applied by the image's init hook, so
/// the tables already exist by the time the server accepts TCP
/// connections. The container is stopped when the fixture is dropped.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    /// Starts a MySQL container suitable for integration tests.
    pub async fn new(config: MysqlConfig) -> Result<Self> {
        let image = GenericImage::new("mysql", config.tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root");

        let container = match &config.schema {
            Some(schema) => {
                image
                    .with_copy_to(
                        INIT_SCRIPT_PATH,
                        CopyDataSource::Data(schema.clone().into_bytes()),
                    )
                    .start()
                    .await?
            }
            None => image.start().await?,
        };

        Ok(Self { container, config })
    }

    pub async fn host(&self) -> Result<String> {
        Ok(self.container.get_host().await?.to_string())
    }

    pub async fn port(&self) -> Result<u16> {
        Ok(self.container.get_host_port_ipv4(MYSQL_PORT).await?)
    }

    /// Connection string for the test database, usable as a sqlx DSN.
    pub async fn database_url(&self) -> Result<String> {
        let host = self.host().await?;
        let port = self.port().await?;
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            self.config.username, self.config.password, host, port, self.config.database
        ))
    }
}
