//! Car database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Car;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub daily_rate: f64,
    pub location: Option<String>,
    pub available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Car {
    fn from(model: Model) -> Self {
        Car {
            id: model.id,
            make: model.make,
            model: model.model,
            year: model.year,
            daily_rate: model.daily_rate,
            location: model.location,
            available: model.available,
        }
    }
}
