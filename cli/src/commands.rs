//! Command handlers: fetch through the client, then print.
//!
//! Every handler finishes its request before writing anything, so a failed
//! operation produces no partial output.

use std::io::Write;

use anyhow::{Context, Result};
use foundation_core::{render, ApiClient, Transport};
use tracing::info;

pub fn environment<T: Transport>(client: &ApiClient<T>, out: &mut impl Write) -> Result<()> {
    let env = client.get_environment().context("environment command failed")?;
    info!(count = env.len(), "fetched environment");
    for (name, value) in &env {
        writeln!(out, "{name}={}", render(value))?;
    }
    Ok(())
}

pub fn configuration<T: Transport>(client: &ApiClient<T>, out: &mut impl Write) -> Result<()> {
    let config = client.get_configuration().context("configuration command failed")?;
    writeln!(out, "{config}")?;
    Ok(())
}

pub fn variable<T: Transport>(
    client: &ApiClient<T>,
    name: &str,
    uid: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let value = client.get_variable(name, uid).context("variable command failed")?;
    info!(name, "fetched variable");
    writeln!(out, "{}", render(&value))?;
    Ok(())
}
