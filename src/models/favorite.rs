use super::movie::{MovieView, ensure_same_movie};
use crate::entities::{favorite_entity, movie_entity};
use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 收藏对外表示，内联电影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteView {
    pub id: String,
    pub username: String,
    pub movie: MovieView,
}

impl FavoriteView {
    pub fn build(
        favorite: favorite_entity::Model,
        movie: &movie_entity::Model,
    ) -> AppResult<Self> {
        ensure_same_movie(&favorite.movie_id, movie)?;
        Ok(Self {
            id: favorite.id,
            username: favorite.username,
            movie: MovieView::from(movie.clone()),
        })
    }
}
