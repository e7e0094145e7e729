//! Sports-data commands.
//!
//! Payloads are printed as returned by the API.

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use gtx_http::{Feed, ListType};

use crate::cli::ApiOptions;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct SportsCommand {
    /// Feed to read from
    #[arg(long, value_enum, default_value_t = FeedArg::Line, global = true)]
    pub feed: FeedArg,

    /// Language code for names
    #[arg(long, default_value = "en", global = true)]
    pub lang: String,

    #[command(subcommand)]
    pub command: SportsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SportsSubcommand {
    /// List sports on the feed
    List,

    /// List countries with events for a sport
    Countries {
        /// Sport ID
        sport: String,
    },

    /// List tournaments for a sport in a country
    Tournaments {
        /// Sport ID
        sport: String,
        /// Country ID
        country: String,
    },

    /// List events in a tournament
    Events {
        /// Sport ID
        sport: String,
        /// Tournament ID
        tournament: String,
        /// Listing shape
        #[arg(long, value_enum, default_value_t = ListTypeArg::List)]
        list_type: ListTypeArg,
        /// Number of events per page
        #[arg(long, default_value_t = 50)]
        page_length: u32,
    },

    /// Show a single event with its markets
    Event {
        /// Game ID
        game: String,
        /// Listing shape
        #[arg(long, value_enum, default_value_t = ListTypeArg::List)]
        list_type: ListTypeArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FeedArg {
    Live,
    Line,
}

impl From<FeedArg> for Feed {
    fn from(arg: FeedArg) -> Self {
        match arg {
            FeedArg::Live => Feed::Live,
            FeedArg::Line => Feed::Line,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ListTypeArg {
    Sub,
    List,
}

impl From<ListTypeArg> for ListType {
    fn from(arg: ListTypeArg) -> Self {
        match arg {
            ListTypeArg::Sub => ListType::Sub,
            ListTypeArg::List => ListType::List,
        }
    }
}

pub async fn handle(cmd: SportsCommand, api: &ApiOptions) -> Result<()> {
    let session = session::open(api)?;
    let transport = session.api();
    let feed = Feed::from(cmd.feed);
    let lang = cmd.lang.as_str();

    let payload = match cmd.command {
        SportsSubcommand::List => transport.sports(feed, lang).await,
        SportsSubcommand::Countries { sport } => transport.countries(&sport, feed, lang).await,
        SportsSubcommand::Tournaments { sport, country } => {
            transport.tournaments(&sport, &country, feed, lang).await
        }
        SportsSubcommand::Events {
            sport,
            tournament,
            list_type,
            page_length,
        } => {
            transport
                .events(
                    &sport,
                    &tournament,
                    list_type.into(),
                    page_length,
                    feed,
                    lang,
                )
                .await
        }
        SportsSubcommand::Event { game, list_type } => {
            transport.event(&game, list_type.into(), feed, lang).await
        }
    }
    .context("Failed to fetch sports data")?;

    output::json_pretty(&payload)
}
