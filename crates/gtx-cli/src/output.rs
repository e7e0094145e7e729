//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use gtx_core::User;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning that does not fail the command.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print the fields of an account profile.
pub fn user(user: &User) {
    field("Name", &user.display_name());
    field("Email", &user.email);
    field("Username", &user.username);
    field("Role", &user.role);
    field("Status", &user.status);
    field("2FA", if user.two_factor_enabled { "on" } else { "off" });
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}
