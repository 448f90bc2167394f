//! Administrative commands: list, show, update, delete and gift.

use clap::Args;
use keepsake_core::{AgeRange, Availability, Category, Condition, Config, GiftDetails, ItemUpdate};
use uuid::Uuid;

use super::OutputArgs;

/// Arguments for the `list` command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only items with this availability
    #[arg(long)]
    pub availability: Option<Availability>,

    /// Only items in this category
    #[arg(long)]
    pub category: Option<Category>,

    /// Only items suitable for this age range
    #[arg(long)]
    pub age_range: Option<AgeRange>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Item id
    pub id: Uuid,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `update` command. Tags cannot be edited.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Item id
    pub id: Uuid,

    /// Where the item is kept
    #[arg(long)]
    pub location: Option<String>,

    /// Physical condition
    #[arg(long)]
    pub condition: Option<Condition>,

    /// Free-form notes (searchable)
    #[arg(long)]
    pub notes: Option<String>,

    /// Availability
    #[arg(long)]
    pub availability: Option<Availability>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl UpdateArgs {
    fn update(&self) -> ItemUpdate {
        ItemUpdate {
            location: self.location.clone(),
            condition: self.condition,
            notes: self.notes.clone(),
            availability: self.availability,
        }
    }
}

/// Arguments for the `delete` command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Item id
    pub id: Uuid,
}

/// Arguments for the `gift` command.
#[derive(Args, Debug)]
pub struct GiftArgs {
    /// Item id
    pub id: Uuid,

    /// Who received the item
    #[arg(long)]
    pub recipient_name: Option<String>,

    /// Recipient age in years
    #[arg(long)]
    pub recipient_age: Option<u32>,

    /// Birthday, wedding, ...
    #[arg(long)]
    pub occasion: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl GiftArgs {
    fn details(&self) -> GiftDetails {
        GiftDetails {
            recipient_name: self.recipient_name.clone(),
            recipient_age: self.recipient_age,
            occasion: self.occasion.clone(),
            notes: self.notes.clone(),
        }
    }
}

pub async fn list(args: ListArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    let outcome = registry
        .list(args.availability, args.category, args.age_range)
        .await?;

    let mut writer = args.output.writer(config);
    writer.write_outcome(&outcome, &outcome.items)?;
    Ok(())
}

pub async fn show(args: ShowArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    let item = registry.get(args.id).await?;

    let mut writer = args.output.writer(config);
    writer.write(&item)?;
    writer.flush()?;
    Ok(())
}

pub async fn update(args: UpdateArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    let item = registry.update(args.id, &args.update()).await?;

    let mut writer = args.output.writer(config);
    writer.write(&item)?;
    writer.flush()?;
    Ok(())
}

pub async fn delete(args: DeleteArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    registry.delete(args.id).await?;
    println!("Deleted {}", args.id);
    Ok(())
}

pub async fn gift(args: GiftArgs, config: &Config) -> anyhow::Result<()> {
    let registry = super::open_registry_offline(config).await?;
    let item = registry.record_gift(args.id, args.details()).await?;

    let mut writer = args.output.writer(config);
    writer.write(&item)?;
    writer.flush()?;
    Ok(())
}
