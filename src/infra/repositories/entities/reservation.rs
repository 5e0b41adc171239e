//! Reservation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Reservation, ReservationStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub car_id: i32,
    pub pickup_date: Date,
    pub dropoff_date: Date,
    #[sea_orm(column_type = "Double")]
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::car::Entity",
        from = "Column::CarId",
        to = "super::car::Column::Id",
        on_delete = "Cascade"
    )]
    Car,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::car::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Car.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Reservation {
    fn from(model: Model) -> Self {
        Reservation {
            id: model.id,
            user_id: model.user_id,
            car_id: model.car_id,
            pickup_date: model.pickup_date,
            dropoff_date: model.dropoff_date,
            total_price: model.total_price,
            status: ReservationStatus::from(model.status.as_str()),
            created_at: model.created_at,
        }
    }
}
