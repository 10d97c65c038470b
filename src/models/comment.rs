use crate::entities::comment_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub username: String,
    pub content: String,
    pub rating: i16,
}

impl From<comment_entity::Model> for CommentView {
    fn from(m: comment_entity::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            content: m.content,
            rating: m.rating,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub movie_id: String,
    pub content: String,
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_view_shape() {
        let comment = comment_entity::Model {
            id: "c1".to_string(),
            username: "13800138000".to_string(),
            movie_id: "m1".to_string(),
            content: "好看".to_string(),
            rating: 5,
        };
        assert_eq!(
            serde_json::to_value(CommentView::from(comment)).unwrap(),
            json!({ "id": "c1", "username": "13800138000", "content": "好看", "rating": 5 })
        );
    }
}
