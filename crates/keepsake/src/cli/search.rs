//! The `keepsake search` command: conversational search over available items.

use clap::Args;
use keepsake_core::{AgeRange, Category, Config, SearchFilter, Theme};

use super::OutputArgs;

/// Arguments for the `search` command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Question in plain English, e.g. "What can we gift a 6-year-old?"
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Require this category instead of the one detected in the query
    #[arg(long)]
    pub category: Option<Category>,

    /// Require this age range instead of the one detected in the query
    #[arg(long)]
    pub age_range: Option<AgeRange>,

    /// Require this theme instead of the one detected in the query
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Require an exact keyword
    #[arg(long)]
    pub keyword: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SearchArgs {
    fn text(&self) -> String {
        self.query.join(" ")
    }

    fn refinement(&self) -> SearchFilter {
        SearchFilter {
            age_range: self.age_range,
            category: self.category,
            theme: self.theme,
            keyword: self.keyword.clone(),
            free_text: None,
        }
    }
}

/// Execute the search command.
pub async fn execute(args: SearchArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    let outcome = registry
        .search_refined(&args.text(), args.refinement())
        .await?;
    tracing::info!("{} item(s) match {:?}", outcome.count, outcome.query);

    let mut writer = args.output.writer(config);
    writer.write_outcome(&outcome, &outcome.items)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SearchArgs,
    }

    #[test]
    fn test_words_are_joined_into_one_query() {
        let harness =
            Harness::try_parse_from(["search", "gifts", "for", "grandmother", "--theme", "cooking"])
                .unwrap();
        assert_eq!(harness.args.text(), "gifts for grandmother");
        assert_eq!(harness.args.refinement().theme, Some(Theme::Cooking));
        assert_eq!(harness.args.refinement().free_text, None);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Harness::try_parse_from(["search", "lego", "--category", "gizmos"]).is_err());
    }
}
