//! Team reads

use tb_core::error::TbError;
use tb_core::result::TbResult;
use tb_models::Team;
use tb_store::Store;
use tracing::debug;

/// Teams are fixture data; only reads are offered
pub struct TeamService<'a> {
    store: &'a Store,
}

impl<'a> TeamService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Team> {
        self.store.read(|c| c.teams.all())
    }

    pub fn find_by_slug(&self, slug: &str) -> TbResult<Team> {
        debug!(slug, "Looking up team");
        self.store
            .read(|c| c.teams.iter().find(|team| team.slug == slug).cloned())
            .ok_or_else(|| TbError::NotFound {
                entity: "Team",
                field: "slug",
                value: slug.to_string(),
            })
    }
}
