//!
//! oceanside storage module
//! ------------------------
//! Thin wiring over the hotel document database. The store holds handles to
//! the three collections in `hotelDB` (`rooms`, `bookings`, `reviews`) and
//! exposes one method per database operation used by the HTTP layer.
//!
//! Key responsibilities:
//! - Client construction with the stable server API pinned, plus a startup ping.
//! - Bounded execution: every operation runs under a deadline so a stalled
//!   server cannot hold requests open indefinitely.
//! - Id handling: route path ids are parsed into ObjectIds before any query.
//!
//! Documents are opaque `bson::Document`s end to end; no schema is enforced
//! on reads or writes.

use std::future::IntoFuture;
use std::time::Duration;

use anyhow::{Context, Result};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::results::UpdateResult;
use mongodb::{Client, Collection};
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};

const DB_NAME: &str = "hotelDB";

/// Handle to the hotel database. Cheap to clone; all clones share one client.
#[derive(Clone)]
pub struct HotelStore {
    client: Client,
    rooms: Collection<Document>,
    bookings: Collection<Document>,
    reviews: Collection<Document>,
    op_deadline: Duration,
}

impl HotelStore {
    /// Build the store from configuration. The driver connects lazily; call
    /// [`HotelStore::ping`] to force a round-trip.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .context("invalid MONGODB_URI")?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        let client = Client::with_options(options).context("failed to build database client")?;
        let db = client.database(DB_NAME);
        Ok(Self {
            rooms: db.collection("rooms"),
            bookings: db.collection("bookings"),
            reviews: db.collection("reviews"),
            client,
            op_deadline: config.db_op_deadline,
        })
    }

    /// Startup connectivity check against the admin database.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("database ping failed")?;
        info!("Pinged your deployment. You successfully connected to MongoDB!");
        Ok(())
    }

    /// Run a driver future under the configured deadline. A timeout surfaces
    /// as 503, a driver error as 500.
    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl IntoFuture<Output = mongodb::error::Result<T>>,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.op_deadline, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(AppError::internal(format!("{op} failed: {e}"))),
            Err(_) => Err(AppError::io(format!("{op} timed out"))),
        }
    }

    pub async fn rooms_all(&self) -> AppResult<Vec<Document>> {
        self.bounded("rooms find", async {
            self.rooms.find(doc! {}).await?.try_collect().await
        })
        .await
    }

    pub async fn room_by_id(&self, id: &str) -> AppResult<Option<Document>> {
        let oid = parse_object_id(id)?;
        self.bounded("room find_one", self.rooms.find_one(doc! { "_id": oid })).await
    }

    pub async fn reviews_all(&self) -> AppResult<Vec<Document>> {
        self.bounded("reviews find", async {
            self.reviews.find(doc! {}).await?.try_collect().await
        })
        .await
    }

    pub async fn insert_review(&self, review: Document) -> AppResult<Bson> {
        let res = self.bounded("review insert", self.reviews.insert_one(review)).await?;
        Ok(res.inserted_id)
    }

    /// Bookings owned by `email`, in natural order.
    pub async fn bookings_for_email(&self, email: &str) -> AppResult<Vec<Document>> {
        self.bounded("bookings find", async {
            self.bookings.find(doc! { "email": email }).await?.try_collect().await
        })
        .await
    }

    pub async fn booking_by_id(&self, id: &str) -> AppResult<Option<Document>> {
        let oid = parse_object_id(id)?;
        self.bounded("booking find_one", self.bookings.find_one(doc! { "_id": oid })).await
    }

    pub async fn insert_booking(&self, booking: Document) -> AppResult<Bson> {
        let res = self.bounded("booking insert", self.bookings.insert_one(booking)).await?;
        Ok(res.inserted_id)
    }

    /// `$set` the given fields on one booking, inserting if absent.
    pub async fn update_booking(&self, id: &str, set: Document) -> AppResult<UpdateResult> {
        let oid = parse_object_id(id)?;
        self.bounded(
            "booking update",
            self.bookings.update_one(doc! { "_id": oid }, doc! { "$set": set }).upsert(true),
        )
        .await
    }

    pub async fn delete_booking(&self, id: &str) -> AppResult<u64> {
        let oid = parse_object_id(id)?;
        let res = self.bounded("booking delete", self.bookings.delete_one(doc! { "_id": oid })).await?;
        Ok(res.deleted_count)
    }
}

fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::user(format!("invalid document id: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ids_must_be_object_id_hex() {
        assert!(parse_object_id("not-an-id").is_err());
        assert!(parse_object_id("").is_err());
        let oid = parse_object_id("65a1b2c3d4e5f6a7b8c9d0e1").expect("24 hex chars parse");
        assert_eq!(oid.to_hex(), "65a1b2c3d4e5f6a7b8c9d0e1");
    }

    #[test]
    fn bad_id_maps_to_user_input() {
        let err = parse_object_id("zzz").unwrap_err();
        assert!(matches!(err, AppError::UserInput { .. }));
    }
}
