use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::AddressRepository;
use crate::{
    db::OrmConn,
    entity::addresses::{
        ActiveModel as AddressActive, Column as AddressCol, Entity as Addresses,
        Model as AddressModel,
    },
    error::{AppError, AppResult},
    models::{Address, NewAddress},
};

#[derive(Clone)]
pub struct SeaOrmAddressRepository {
    db: OrmConn,
}

impl SeaOrmAddressRepository {
    pub fn new(db: OrmConn) -> Self {
        Self { db }
    }

    async fn find_live(&self, user_id: i64, id: i64) -> AppResult<AddressModel> {
        Addresses::find()
            .filter(
                Condition::all()
                    .add(AddressCol::Id.eq(id))
                    .add(AddressCol::UserId.eq(user_id))
                    .add(AddressCol::DeletedAt.is_null()),
            )
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn create_address(&self, user_id: i64, address: NewAddress) -> AppResult<Address> {
        let model = AddressActive {
            id: NotSet,
            user_id: Set(user_id),
            recipient: Set(address.recipient),
            phone: Set(address.phone),
            street: Set(address.street),
            sub_district: Set(address.sub_district),
            urban_village: Set(address.urban_village),
            city: Set(address.city),
            postal_code: Set(address.postal_code),
            created_at: NotSet,
            updated_at: NotSet,
            deleted_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        Ok(address_from_entity(model))
    }

    async fn get_all_address(&self, user_id: i64) -> AppResult<Vec<Address>> {
        let addresses = Addresses::find()
            .filter(
                Condition::all()
                    .add(AddressCol::UserId.eq(user_id))
                    .add(AddressCol::DeletedAt.is_null()),
            )
            .order_by_asc(AddressCol::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(address_from_entity)
            .collect();
        Ok(addresses)
    }

    async fn get_address_id(&self, user_id: i64, id: i64) -> AppResult<Address> {
        self.find_live(user_id, id).await.map(address_from_entity)
    }

    async fn update_address(
        &self,
        user_id: i64,
        id: i64,
        address: NewAddress,
    ) -> AppResult<Address> {
        let existing = self.find_live(user_id, id).await?;

        let mut active: AddressActive = existing.into();
        active.recipient = Set(address.recipient);
        active.phone = Set(address.phone);
        active.street = Set(address.street);
        active.sub_district = Set(address.sub_district);
        active.urban_village = Set(address.urban_village);
        active.city = Set(address.city);
        active.postal_code = Set(address.postal_code);
        active.updated_at = Set(Utc::now().into());
        let model = active.update(&self.db).await?;

        Ok(address_from_entity(model))
    }

    async fn delete_address(&self, user_id: i64, id: i64) -> AppResult<()> {
        let existing = self.find_live(user_id, id).await?;

        let mut active: AddressActive = existing.into();
        active.deleted_at = Set(Some(Utc::now().into()));
        active.update(&self.db).await?;
        Ok(())
    }
}

fn address_from_entity(model: AddressModel) -> Address {
    Address {
        id: model.id,
        user_id: model.user_id,
        recipient: model.recipient,
        phone: model.phone,
        street: model.street,
        sub_district: model.sub_district,
        urban_village: model.urban_village,
        city: model.city,
        postal_code: model.postal_code,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
