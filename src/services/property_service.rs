use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::ListingConfig;
use crate::database::models::{NewProperty, Property, Role};
use crate::database::Store;
use crate::error::ApiError;
use crate::filter::{PageMeta, Pagination, PropertyFilter, PropertyListQuery};

use super::access::{require_account, require_landlord_profile, require_property};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    pub area: Option<String>,
    #[validate(length(min = 1, message = "Property type is required"))]
    pub property_type: String,
    #[validate(range(min = 0, message = "Bedrooms cannot be negative"))]
    pub bedrooms: i32,
    /// Minor currency units
    #[validate(range(min = 0, message = "Rent amount cannot be negative"))]
    pub rent_amount: i64,
    pub agency_id: Option<Uuid>,
}

/// Property plus the whole days left on its active contract
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub days_left: Option<i64>,
}

/// Days until `expires_at`, rounded up. A contract expiring in two hours has
/// one day left; one that expired two hours ago has zero.
pub fn days_until(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
    let millis = (expires_at? - now).num_milliseconds();
    if millis > 0 {
        Some((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
    } else {
        Some(-(-millis / MILLIS_PER_DAY))
    }
}

/// Soonest expiry first, properties without a contract last. The sort is
/// stable so the incoming order breaks ties.
pub fn rank_by_days_left(listings: &mut [PropertyListing]) {
    listings.sort_by(|a, b| match (a.days_left, b.days_left) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub struct PropertyService {
    store: Arc<dyn Store>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn create(
        &self,
        account_id: Uuid,
        request: CreatePropertyRequest,
    ) -> Result<Property, ApiError> {
        let store = self.store.as_ref();
        let account = require_account(store, account_id).await?;
        let landlord = require_landlord_profile(store, account_id).await?;

        if !account.has_role(Role::Landlord) {
            return Err(ApiError::forbidden("Only landlords can create properties"));
        }

        if let Some(agency_id) = request.agency_id {
            store
                .find_agency(agency_id)
                .await?
                .ok_or_else(|| ApiError::not_found("Agency not found"))?;
        }

        let property = store
            .insert_property(NewProperty {
                landlord_id: landlord.id,
                agency_id: request.agency_id,
                title: request.title,
                address: request.address,
                city: request.city,
                area: request.area.filter(|a| !a.trim().is_empty()),
                property_type: request.property_type,
                bedrooms: request.bedrooms,
                rent_amount: request.rent_amount,
            })
            .await?;

        tracing::info!("Landlord {} created property {}", landlord.id, property.id);
        Ok(property)
    }

    pub async fn list_all(&self) -> Result<Vec<Property>, ApiError> {
        Ok(self.store.list_properties().await?)
    }

    pub async fn get(&self, property_id: Uuid) -> Result<Property, ApiError> {
        require_property(self.store.as_ref(), property_id).await
    }

    pub async fn mine(
        &self,
        account_id: Uuid,
        query: &PropertyListQuery,
        listing: &ListingConfig,
    ) -> Result<(Vec<PropertyListing>, PageMeta), ApiError> {
        self.mine_at(account_id, query, listing, Utc::now()).await
    }

    /// The landlord's properties matching the query, ranked by days left on
    /// their contract and then paginated.
    pub async fn mine_at(
        &self,
        account_id: Uuid,
        query: &PropertyListQuery,
        listing: &ListingConfig,
        now: DateTime<Utc>,
    ) -> Result<(Vec<PropertyListing>, PageMeta), ApiError> {
        let store = self.store.as_ref();
        require_account(store, account_id).await?;
        let landlord = require_landlord_profile(store, account_id).await?;

        let filter = PropertyFilter::from_query(query);
        let pagination = Pagination::new(
            query.page,
            query.limit,
            listing.default_limit,
            listing.max_limit,
        );

        let mut listings: Vec<PropertyListing> = store
            .list_landlord_properties(landlord.id, &filter)
            .await?
            .into_iter()
            .map(|property| PropertyListing {
                days_left: days_until(property.contract_expires_at, now),
                property,
            })
            .collect();

        rank_by_days_left(&mut listings);

        let meta = pagination.meta(listings.len());
        Ok((pagination.apply(listings), meta))
    }
}
