use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo entry. Completed items stay in the table and remain
/// addressable by id; they just drop out of the active list.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "todo_item")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let item = Model {
            id: Uuid::new_v4(),
            description: "buy milk".into(),
            is_completed: false,
        };
        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["description"], "buy milk");
        assert_eq!(json["isCompleted"], false);
        assert!(json.get("is_completed").is_none());
    }

    #[test]
    fn is_completed_defaults_to_false_on_deserialize() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{id}","description":"walk dog"}}"#);
        let item: Model = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(item.id, id);
        assert!(!item.is_completed);
    }
}
