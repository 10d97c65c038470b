use super::common::avatar_path;
use crate::entities::user_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 用户对外表示，不包含任何密码哈希
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[schema(example = "13800138000")]
    pub id: String,
    pub nickname: String,
    #[schema(example = "/static/images/user/MonkeyEye.jpg")]
    pub avatar: String,
    pub description: String,
    pub money: f64,
}

impl From<user_entity::Model> for UserView {
    fn from(m: user_entity::Model) -> Self {
        Self {
            avatar: avatar_path(&m.avatar),
            id: m.id,
            nickname: m.nickname,
            description: m.description,
            money: m.money,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[schema(example = "13800138000")]
    pub phone: String,
    #[schema(example = "123456")]
    pub verification_code: String,
    #[schema(example = "password123")]
    pub password: String,
    #[schema(example = "654321")]
    pub pay_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "13800138000")]
    pub phone: String,
    #[schema(example = "password123")]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_view_hides_passwords() {
        let model = user_entity::Model {
            id: "13800138000".to_string(),
            password: "$2b$12$hash".to_string(),
            pay_password: "$2b$12$payhash".to_string(),
            nickname: "猿眼用户".to_string(),
            money: 50.0,
            description: "这个人很懒，什么也没留下".to_string(),
            avatar: "MonkeyEye.jpg".to_string(),
            is_admin: false,
        };

        let value = serde_json::to_value(UserView::from(model)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "13800138000",
                "nickname": "猿眼用户",
                "avatar": "/static/images/user/MonkeyEye.jpg",
                "description": "这个人很懒，什么也没留下",
                "money": 50.0
            })
        );
    }
}
