use crate::{ConnectionParts, SchemaSource};
use std::error::Error;
use url::Url;

/// The database URL to introspect: `--database-url` / `DATABASE_URL` when
/// set, otherwise assembled from the `DB_*` connection settings.
pub fn resolve_database_url(source: &SchemaSource) -> Result<String, Box<dyn Error>> {
    match &source.database_url {
        Some(url) => Ok(url.clone()),
        None => build_database_url(&source.connection),
    }
}

pub fn build_database_url(parts: &ConnectionParts) -> Result<String, Box<dyn Error>> {
    let driver = parts.db_driver.as_deref().unwrap_or("mysql");
    let Some(name) = parts.db_name.as_deref().filter(|name| !name.is_empty()) else {
        return Err("No database configured, set DATABASE_URL or DB_NAME".into());
    };

    if driver == "sqlite" {
        return Ok(format!("sqlite://{name}"));
    }

    let host = parts.db_host.as_deref().unwrap_or("localhost");
    let mut url = Url::parse(&format!("{driver}://{host}"))?;
    if parts.db_port.is_some() {
        url.set_port(parts.db_port)
            .map_err(|_| format!("Cannot set a port on a `{driver}` URL"))?;
    }
    if let Some(user) = parts.db_user.as_deref() {
        url.set_username(user)
            .map_err(|_| format!("Cannot set a user name on a `{driver}` URL"))?;
    }
    if let Some(password) = parts.db_password.as_deref() {
        url.set_password(Some(password))
            .map_err(|_| format!("Cannot set a password on a `{driver}` URL"))?;
    }
    url.set_path(&format!("/{name}"));
    if driver == "mysql" {
        if let Some(charset) = parts.db_charset.as_deref() {
            url.query_pairs_mut().append_pair("charset", charset);
        }
    }
    Ok(url.to_string())
}
