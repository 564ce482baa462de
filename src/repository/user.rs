use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr};

use super::UserRepository;
use crate::{
    db::OrmConn,
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{NewUser, User, UserCredentials},
};

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: OrmConn,
}

impl SeaOrmUserRepository {
    pub fn new(db: OrmConn) -> Self {
        Self { db }
    }
}

/// A concurrent registration can still hit the unique index on `email`.
fn email_taken_or(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Email is already taken".into())
        }
        _ => AppError::OrmError(err),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let user = UserActive {
            id: NotSet,
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            created_at: NotSet,
        }
        .insert(&self.db)
        .await
        .map_err(email_taken_or)?;

        Ok(user_from_entity(user).user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let user = Users::find()
            .filter(UserCol::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user.map(user_from_entity))
    }
}

fn user_from_entity(model: UserModel) -> UserCredentials {
    UserCredentials {
        user: User {
            id: model.id,
            name: model.name,
            email: model.email,
            created_at: model.created_at.with_timezone(&Utc),
        },
        password_hash: model.password_hash,
    }
}
