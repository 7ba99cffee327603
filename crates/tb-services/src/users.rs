//! User operations

use tb_contracts::{Contract, UserContract};
use tb_core::result::{OrNotFound, TbResult};
use tb_core::traits::Id;
use tb_models::{NewUser, User, UserPatch};
use tb_store::Store;
use tracing::{debug, info, warn};

pub struct UserService<'a> {
    store: &'a Store,
    contract: UserContract,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self {
            store,
            contract: UserContract::new(),
        }
    }

    pub fn list(&self) -> Vec<User> {
        self.store.read(|c| c.users.all())
    }

    pub fn find(&self, id: Id) -> TbResult<User> {
        debug!(user_id = id, "Loading user");
        self.store.read(|c| c.users.find(id).cloned()).or_not_found::<User>(id)
    }

    /// Validate and append a new user. The id is taken only once the
    /// input passes validation.
    pub fn create(&self, input: NewUser) -> TbResult<User> {
        let mut candidate = input.into_user(0);
        if let Err(errors) = self.contract.validate(&candidate) {
            warn!(errors = %errors, "Rejected new user");
            return Err(errors.into());
        }

        let user = self.store.write(|c| {
            candidate.id = c.sequences.users.next_id();
            c.users.insert(candidate.clone());
            candidate
        });
        info!(user_id = user.id, role = user.role.as_str(), "User created");
        Ok(user)
    }

    pub fn update(&self, id: Id, patch: UserPatch) -> TbResult<User> {
        self.store.write(|c| {
            let current = c.users.find(id).or_not_found::<User>(id)?;
            let merged = patch.apply_to(current);
            if let Err(errors) = self.contract.validate(&merged) {
                warn!(user_id = id, errors = %errors, "Rejected user update");
                return Err(errors.into());
            }
            c.users.replace(merged.clone());
            info!(user_id = id, "User updated");
            Ok(merged)
        })
    }

    /// Remove the user. Tasks assigned to them keep the dangling id.
    pub fn delete(&self, id: Id) -> TbResult<()> {
        self.store
            .write(|c| c.users.remove(id))
            .or_not_found::<User>(id)?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
