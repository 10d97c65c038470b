use super::common::poster_path;
use crate::entities::{movie_entity, recommend_entity, screen_entity};
use crate::error::{AppError, AppResult};
use crate::utils::{date_to_millis, datetime_to_millis};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovieView {
    pub id: String,
    pub name: String,
    /// 海报路径，无海报时为 null
    #[schema(example = "/static/images/poster/spirited-away.jpg")]
    pub poster: Option<String>,
    pub movie_type: String,
    pub playing_type: String,
    /// 上映日期（毫秒时间戳）
    pub playing_time: i64,
    pub duration: i16,
    pub rating: f64,
    pub description: String,
    pub rating_num: i16,
}

impl From<movie_entity::Model> for MovieView {
    fn from(m: movie_entity::Model) -> Self {
        Self {
            poster: m.poster.as_deref().map(poster_path),
            playing_time: date_to_millis(m.playing_time),
            id: m.id,
            name: m.name,
            movie_type: m.movie_type,
            playing_type: m.playing_type,
            duration: m.duration,
            rating: m.rating,
            description: m.description,
            rating_num: m.rating_num,
        }
    }
}

/// 场次对外表示，内联所属电影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenView {
    pub id: String,
    pub movie: MovieView,
    /// 放映时间（毫秒时间戳）
    pub time: i64,
    pub price: f64,
    pub ticket_num: i16,
    pub hall_num: String,
    pub playing_type: String,
}

impl ScreenView {
    /// 由已加载的场次与其电影构建
    pub fn build(screen: screen_entity::Model, movie: &movie_entity::Model) -> AppResult<Self> {
        ensure_same_movie(&screen.movie_id, movie)?;
        Ok(Self {
            id: screen.id,
            playing_type: movie.playing_type.clone(),
            movie: MovieView::from(movie.clone()),
            time: datetime_to_millis(screen.time),
            price: screen.price,
            ticket_num: screen.ticket_num,
            hall_num: screen.hall_num,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendView {
    pub movie_id: String,
    pub poster: Option<String>,
    pub playing_time: i64,
}

impl RecommendView {
    pub fn build(
        recommend: recommend_entity::Model,
        movie: &movie_entity::Model,
    ) -> AppResult<Self> {
        ensure_same_movie(&recommend.movie_id, movie)?;
        Ok(Self {
            movie_id: recommend.movie_id,
            poster: movie.poster.as_deref().map(poster_path),
            playing_time: date_to_millis(movie.playing_time),
        })
    }
}

pub(crate) fn ensure_same_movie(movie_id: &str, movie: &movie_entity::Model) -> AppResult<()> {
    if movie.id != movie_id {
        return Err(AppError::ValidationError(format!(
            "Movie {} does not match reference {movie_id}",
            movie.id
        )));
    }
    Ok(())
}
