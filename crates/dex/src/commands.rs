//! Subcommands and their handler

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use dexcache::{
    suggest, tiers, AbilityView, CacheService, EvolutionTiers, ListKind, SUGGESTION_LIMIT,
};
use tracing::warn;

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a creature by name or id
    Search { query: String },
    /// Look up an ability by name or id
    Ability { query: String },
    /// List names starting with a prefix
    Suggest { prefix: String },
    /// Compare two creatures
    Compare { left: String, right: String },
    /// Add or remove a favorite
    Favorite { query: String },
    /// Show search history
    History,
    /// Show favorites
    Favorites,
    /// Remove one entry from a list
    Remove { list: ListArg, id: u32 },
    /// Clear a list or the whole cache
    Clear { target: ClearTarget },
    /// Show cache statistics
    Stats,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ListArg {
    History,
    Favorites,
}

impl From<ListArg> for ListKind {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::History => ListKind::History,
            ListArg::Favorites => ListKind::Favorites,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ClearTarget {
    History,
    Favorites,
    Cache,
}

pub struct CommandHandler {
    service: CacheService,
    lang: String,
}

impl CommandHandler {
    pub fn new(service: CacheService, lang: String) -> Self {
        Self { service, lang }
    }

    pub async fn handle(&self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Search { query } => self.handle_search(&query).await,
            Command::Ability { query } => self.handle_ability(&query).await,
            Command::Suggest { prefix } => self.handle_suggest(&prefix).await,
            Command::Compare { left, right } => self.handle_compare(&left, &right).await,
            Command::Favorite { query } => self.handle_favorite(&query).await,
            Command::History => {
                print!("{}", render::summaries("history", &self.service.lists().history()));
                Ok(())
            }
            Command::Favorites => {
                print!("{}", render::summaries("favorites", &self.service.lists().favorites()));
                Ok(())
            }
            Command::Remove { list, id } => self.handle_remove(list.into(), id),
            Command::Clear { target } => self.handle_clear(target),
            Command::Stats => self.handle_stats(),
        }
    }

    async fn handle_search(&self, query: &str) -> Result<()> {
        let fetched = self.service.fetch_pokemon(query).await?;
        let entity = fetched.data;
        self.service.lists().record_history(&entity);

        let favorite = self.service.lists().is_favorite(entity.id);
        print!("{}", render::entity(&entity, fetched.origin, favorite));

        match self.evolution(entity.id).await {
            Ok(chain) => print!("{}", render::tiers(&chain)),
            Err(e) => {
                let reason = format!("{:#}", e);
                warn!(id = entity.id, error = %reason, "evolution chain unavailable");
            }
        }
        Ok(())
    }

    async fn evolution(&self, species_id: u32) -> Result<EvolutionTiers> {
        let species = self.service.fetch_species(species_id).await?.data;
        let Some(chain_id) = species.evolution_chain_id() else {
            return Ok(EvolutionTiers::default());
        };
        let chain = self
            .service
            .fetch_evolution_chain(chain_id)
            .await
            .with_context(|| format!("evolution chain {}", chain_id))?;
        Ok(tiers(&chain.data.chain))
    }

    async fn handle_ability(&self, query: &str) -> Result<()> {
        let fetched = self.service.fetch_ability(query).await?;
        let view = AbilityView::from_response(&fetched.data, &self.lang);
        print!("{}", render::ability(&view, fetched.origin));
        Ok(())
    }

    async fn handle_suggest(&self, prefix: &str) -> Result<()> {
        let names = self.service.fetch_name_index().await?;
        for name in suggest(&names, prefix, SUGGESTION_LIMIT) {
            println!("{}", name);
        }
        Ok(())
    }

    async fn handle_compare(&self, left: &str, right: &str) -> Result<()> {
        let left = self.service.fetch_pokemon(left).await?;
        self.service.lists().record_history(&left.data);
        let right = self.service.fetch_pokemon(right).await?;
        self.service.lists().record_history(&right.data);

        println!(
            "[{}] {} vs [{}] {}",
            left.origin, left.data.name, right.origin, right.data.name
        );
        print!("{}", render::battle(&left.data, &right.data));
        Ok(())
    }

    async fn handle_favorite(&self, query: &str) -> Result<()> {
        let entity = self.service.fetch_pokemon(query).await?.data;
        if self.service.lists().toggle_favorite(&entity)? {
            println!("added {} to favorites", entity.name);
        } else {
            println!("removed {} from favorites", entity.name);
        }
        Ok(())
    }

    fn handle_remove(&self, kind: ListKind, id: u32) -> Result<()> {
        if self.service.lists().remove(kind, id)? {
            println!("removed #{} from {}", id, kind);
        } else {
            println!("#{} is not in {}", id, kind);
        }
        Ok(())
    }

    fn handle_clear(&self, target: ClearTarget) -> Result<()> {
        match target {
            ClearTarget::History => self.service.lists().clear(ListKind::History)?,
            ClearTarget::Favorites => self.service.lists().clear(ListKind::Favorites)?,
            ClearTarget::Cache => {
                let removed = self.service.clear_cache()?;
                println!("removed {} cache entries", removed);
                return Ok(());
            }
        }
        println!("cleared");
        Ok(())
    }

    fn handle_stats(&self) -> Result<()> {
        let config = self.service.config();
        println!("cache entries: {}", self.service.cache_len());
        println!("prefix:        {}", config.cache_prefix);
        println!("ttl:           {}s", config.ttl.as_secs());
        println!("history:       {}", self.service.lists().history().len());
        println!("favorites:     {}", self.service.lists().favorites().len());
        Ok(())
    }
}
