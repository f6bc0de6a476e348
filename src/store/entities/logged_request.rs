//! LoggedRequest entity: one archived request per row

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "requestlog")]
pub struct Model {
    /// Store-assigned surrogate key
    #[sea_orm(primary_key)]
    pub id: i32,

    /// JSON-encoded archive request
    #[sea_orm(column_type = "Json")]
    pub request: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
