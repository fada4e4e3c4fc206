use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub store_id: String,
    pub billboard_id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store::Entity",
        from = "Column::StoreId",
        to = "super::store::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Store,
    // Categories pin their billboard; deleting a billboard in use is refused.
    #[sea_orm(
        belongs_to = "super::billboard::Entity",
        from = "Column::BillboardId",
        to = "super::billboard::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Billboard,
}

impl Related<super::store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl Related<super::billboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Billboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
