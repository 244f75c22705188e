//! Scenario catalog
//!
//! Each scenario is a short, fixed sequence of calls with assertions.
//! Parameterized scenarios run once per fixture. A scenario either returns
//! `Ok(())` or stops at the first failed assertion or transport fault.

use std::fmt;
use std::str::FromStr;

use petstore_common::{Error, Expectations, Pet, Result};

use crate::client::{Exchange, PetStoreClient};
use crate::fixtures::{Fixture, DELETE_TWICE_ID, RENAMED_TO};

const OK: u16 = 200;
const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// POST, expect 200 and an equal body
    Create,
    /// POST, GET, expect 200 and an equal body
    CreateThenRead,
    /// POST, DELETE, GET, expect 404
    CreateDeleteRead,
    /// POST, rename, PUT, expect 200
    CreateThenUpdate,
    /// POST, DELETE, rename, PUT, expect the configured missing-update status
    CreateDeleteUpdate,
    /// POST, DELETE expect 200, GET expect 404
    CreateDeleteReadFullCycle,
    /// DELETE a fixed id, DELETE it again, expect 404
    DeleteNonexistentTwice,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::Create,
        Scenario::CreateThenRead,
        Scenario::CreateDeleteRead,
        Scenario::CreateThenUpdate,
        Scenario::CreateDeleteUpdate,
        Scenario::CreateDeleteReadFullCycle,
        Scenario::DeleteNonexistentTwice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Create => "create",
            Scenario::CreateThenRead => "create-then-read",
            Scenario::CreateDeleteRead => "create-delete-read",
            Scenario::CreateThenUpdate => "create-then-update",
            Scenario::CreateDeleteUpdate => "create-delete-update",
            Scenario::CreateDeleteReadFullCycle => "create-delete-read-full-cycle",
            Scenario::DeleteNonexistentTwice => "delete-nonexistent-twice",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Create => "created pet is echoed back unchanged",
            Scenario::CreateThenRead => "created pet reads back unchanged",
            Scenario::CreateDeleteRead => "deleted pet reads as not found",
            Scenario::CreateThenUpdate => "existing pet can be renamed",
            Scenario::CreateDeleteUpdate => "updating a deleted pet is answered per expectation",
            Scenario::CreateDeleteReadFullCycle => "delete succeeds, then the pet reads as not found",
            Scenario::DeleteNonexistentTwice => "second delete of the same id is not found",
        }
    }

    pub fn is_parameterized(&self) -> bool {
        !matches!(self, Scenario::DeleteNonexistentTwice)
    }

    /// The scenario asserts that an id is absent, which another writer on a
    /// shared service can invalidate between two calls.
    pub fn shared_state_sensitive(&self) -> bool {
        matches!(
            self,
            Scenario::CreateDeleteRead
                | Scenario::CreateDeleteUpdate
                | Scenario::CreateDeleteReadFullCycle
                | Scenario::DeleteNonexistentTwice
        )
    }

    /// Run against `session`. Parameterized scenarios need a fixture.
    pub async fn execute(
        &self,
        session: &mut Session<'_>,
        fixture: Option<&Fixture>,
        expectations: &Expectations,
    ) -> Result<()> {
        let mut pet = match (self, fixture) {
            (Scenario::DeleteNonexistentTwice, _) => {
                return delete_nonexistent_twice(session).await;
            }
            (_, Some(fixture)) => fixture.pet.clone(),
            (_, None) => {
                return Err(Error::InvalidConfig(format!(
                    "scenario {} needs a fixture",
                    self
                )));
            }
        };

        match self {
            Scenario::Create => {
                session.create(&pet).await?.expect_status(OK)?.expect_pet(&pet)?;
            }
            Scenario::CreateThenRead => {
                session.create(&pet).await?.pet()?;
                session.get(pet.id).await?.expect_status(OK)?.expect_pet(&pet)?;
            }
            Scenario::CreateDeleteRead => {
                session.create(&pet).await?;
                session.delete(pet.id).await?;
                session.get(pet.id).await?.expect_status(NOT_FOUND)?;
            }
            Scenario::CreateThenUpdate => {
                session.create(&pet).await?.pet()?;
                pet.rename(RENAMED_TO);
                session.update(&pet).await?.expect_status(OK)?;
            }
            Scenario::CreateDeleteUpdate => {
                session.create(&pet).await?.pet()?;
                session.delete(pet.id).await?;
                pet.rename(RENAMED_TO);
                session
                    .update(&pet)
                    .await?
                    .expect_status(expectations.update_missing_status)?;
            }
            Scenario::CreateDeleteReadFullCycle => {
                session.create(&pet).await?.pet()?;
                session.delete(pet.id).await?.expect_status(OK)?;
                session.get(pet.id).await?.expect_status(NOT_FOUND)?;
            }
            Scenario::DeleteNonexistentTwice => {}
        }

        Ok(())
    }
}

async fn delete_nonexistent_twice(session: &mut Session<'_>) -> Result<()> {
    // Cleanup; the pet may or may not exist.
    session.delete(DELETE_TWICE_ID).await?;
    session
        .delete(DELETE_TWICE_ID)
        .await?
        .expect_status(NOT_FOUND)?;
    Ok(())
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scenario {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| Error::UnknownScenario(s.to_string()))
    }
}

/// Client wrapper that keeps every exchange of one case
pub struct Session<'a> {
    client: &'a PetStoreClient,
    exchanges: Vec<Exchange>,
}

impl<'a> Session<'a> {
    pub fn new(client: &'a PetStoreClient) -> Self {
        Self {
            client,
            exchanges: Vec::new(),
        }
    }

    pub async fn create(&mut self, pet: &Pet) -> Result<&Exchange> {
        let exchange = self.client.create(pet).await?;
        Ok(self.record(exchange))
    }

    pub async fn get(&mut self, id: i64) -> Result<&Exchange> {
        let exchange = self.client.get(id).await?;
        Ok(self.record(exchange))
    }

    pub async fn update(&mut self, pet: &Pet) -> Result<&Exchange> {
        let exchange = self.client.update(pet).await?;
        Ok(self.record(exchange))
    }

    pub async fn delete(&mut self, id: i64) -> Result<&Exchange> {
        let exchange = self.client.delete(id).await?;
        Ok(self.record(exchange))
    }

    pub fn into_exchanges(self) -> Vec<Exchange> {
        self.exchanges
    }

    fn record(&mut self, exchange: Exchange) -> &Exchange {
        let index = self.exchanges.len();
        self.exchanges.push(exchange);
        &self.exchanges[index]
    }
}
