//! Register command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use gtx_core::Registration;

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Public username
    #[arg(long)]
    pub username: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Account password
    #[arg(long, env = "GTX_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Accept the terms of service
    #[arg(long)]
    pub agree_to_terms: bool,
}

impl RegisterArgs {
    fn into_registration(self) -> Registration {
        let mut registration =
            Registration::new(self.email, self.username, self.phone, self.password)
                .agree_to_terms(self.agree_to_terms);
        if let Some(first_name) = self.first_name {
            registration = registration.first_name(first_name);
        }
        if let Some(last_name) = self.last_name {
            registration = registration.last_name(last_name);
        }
        if let Some(country) = self.country {
            registration = registration.country(country);
        }
        if let Some(city) = self.city {
            registration = registration.city(city);
        }
        registration
    }
}

pub async fn run(args: RegisterArgs, api: &ApiOptions) -> Result<()> {
    if !args.agree_to_terms {
        bail!("Registration requires --agree-to-terms");
    }

    let session = session::open(api)?;
    let registration = args.into_registration();

    eprintln!("{}", "Creating account...".dimmed());

    let user = match session.register(&registration).await {
        Ok(user) => user,
        Err(err) => {
            if let Some(fields) = err.field_errors() {
                for (field, messages) in fields {
                    for message in messages {
                        output::warning(&format!("{}: {}", field, message));
                    }
                }
            }
            return Err(err).context("Failed to register");
        }
    };

    output::success("Account created");
    println!();
    output::user(&user);

    Ok(())
}
