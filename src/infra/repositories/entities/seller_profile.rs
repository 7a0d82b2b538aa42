//! Seller profile entity.

use sea_orm::entity::prelude::*;

use crate::domain::SellerProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seller_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub surname: String,
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub zone: String,
    #[sea_orm(unique)]
    pub national_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SellerProfile {
    fn from(model: Model) -> Self {
        SellerProfile {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            surname: model.surname,
            phone: model.phone,
            email: model.email,
            zone: model.zone,
            national_id: model.national_id,
        }
    }
}
