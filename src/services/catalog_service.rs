use crate::entities::{
    comment_entity as comments, movie_entity as movies, recommend_entity as recommends,
    screen_entity as screens,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::generate_entity_id;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use std::sync::Arc;

/// 评分取值范围
pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

#[derive(Clone)]
pub struct CatalogService {
    pool: Arc<DatabaseConnection>,
}

impl CatalogService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// 电影列表（按上映日期倒序），默认不含已下架电影
    pub async fn list_movies(&self, include_expired: bool) -> AppResult<Vec<MovieView>> {
        let mut query = movies::Entity::find();
        if !include_expired {
            query = query.filter(movies::Column::Expired.eq(false));
        }
        let list = query
            .order_by_desc(movies::Column::PlayingTime)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(MovieView::from).collect())
    }

    pub async fn get_movie(&self, movie_id: &str) -> AppResult<MovieView> {
        let movie = find_movie(self.pool.as_ref(), movie_id).await?;
        Ok(movie.into())
    }

    /// 某部电影的全部场次（按放映时间升序）
    pub async fn list_screens(&self, movie_id: &str) -> AppResult<Vec<ScreenView>> {
        let movie = find_movie(self.pool.as_ref(), movie_id).await?;
        let list = screens::Entity::find()
            .filter(screens::Column::MovieId.eq(movie_id))
            .order_by_asc(screens::Column::Time)
            .all(self.pool.as_ref())
            .await?;

        list.into_iter()
            .map(|screen| ScreenView::build(screen, &movie))
            .collect()
    }

    pub async fn get_screen(&self, screen_id: &str) -> AppResult<ScreenView> {
        let screen = screens::Entity::find_by_id(screen_id.to_string())
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Screen not found".to_string()))?;
        let movie = find_movie(self.pool.as_ref(), &screen.movie_id).await?;
        ScreenView::build(screen, &movie)
    }

    /// 推荐位列表，电影一次性批量加载
    pub async fn list_recommends(&self) -> AppResult<Vec<RecommendView>> {
        let list = recommends::Entity::find()
            .order_by_asc(recommends::Column::MovieId)
            .all(self.pool.as_ref())
            .await?;
        let ids = list.iter().map(|r| r.movie_id.clone()).collect();
        let movie_map = load_movies(self.pool.as_ref(), ids).await?;

        let mut views = Vec::with_capacity(list.len());
        for recommend in list {
            match movie_map.get(&recommend.movie_id) {
                Some(movie) => views.push(RecommendView::build(recommend, movie)?),
                None => log::warn!("Recommended movie {} not found", recommend.movie_id),
            }
        }
        Ok(views)
    }

    pub async fn list_comments(&self, movie_id: &str) -> AppResult<Vec<CommentView>> {
        let list = comments::Entity::find()
            .filter(comments::Column::MovieId.eq(movie_id))
            .order_by_asc(comments::Column::Id)
            .all(self.pool.as_ref())
            .await?;
        Ok(list.into_iter().map(CommentView::from).collect())
    }

    /// 发表评论；评分需在 1-5 之间，不会自动刷新电影评分
    pub async fn add_comment(
        &self,
        username: &str,
        request: CreateCommentRequest,
    ) -> AppResult<CommentView> {
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        let content = request.content.trim();
        if content.is_empty() {
            return Err(AppError::ValidationError(
                "Comment content must not be empty".to_string(),
            ));
        }

        let movie = find_movie(self.pool.as_ref(), &request.movie_id).await?;

        let model = comments::ActiveModel {
            id: Set(generate_entity_id()),
            username: Set(username.to_string()),
            movie_id: Set(movie.id),
            content: Set(content.to_string()),
            rating: Set(request.rating),
        }
        .insert(self.pool.as_ref())
        .await?;

        Ok(model.into())
    }

    /// 根据现有评论重新计算电影评分（保留一位小数）与评分人数
    pub async fn refresh_movie_rating(&self, movie_id: &str) -> AppResult<MovieView> {
        let movie = find_movie(self.pool.as_ref(), movie_id).await?;
        let list = comments::Entity::find()
            .filter(comments::Column::MovieId.eq(movie_id))
            .all(self.pool.as_ref())
            .await?;

        let (rating, rating_num) = aggregate_rating(list.iter().map(|c| c.rating));

        let mut am = movie.into_active_model();
        am.rating = Set(rating);
        am.rating_num = Set(rating_num);
        let updated = am.update(self.pool.as_ref()).await?;

        log::info!("Movie {movie_id} rating refreshed: {rating} ({rating_num})");
        Ok(updated.into())
    }
}

/// 平均分（一位小数）与人数，无评论时为 (0, 0)
fn aggregate_rating<I>(ratings: I) -> (f64, i16)
where
    I: IntoIterator<Item = i16>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r), count + 1));
    if count == 0 {
        return (0.0, 0);
    }
    let avg = (sum as f64 / count as f64 * 10.0).round() / 10.0;
    (avg, i16::try_from(count).unwrap_or(i16::MAX))
}

pub(crate) async fn find_movie(
    pool: &DatabaseConnection,
    movie_id: &str,
) -> AppResult<movies::Model> {
    movies::Entity::find_by_id(movie_id.to_string())
        .one(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

/// 按 id 批量加载电影
pub(crate) async fn load_movies(
    pool: &DatabaseConnection,
    mut ids: Vec<String>,
) -> AppResult<HashMap<String, movies::Model>> {
    ids.sort();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let list = movies::Entity::find()
        .filter(movies::Column::Id.is_in(ids))
        .all(pool)
        .await?;
    Ok(list.into_iter().map(|m| (m.id.clone(), m)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{sample_movie, sample_screen};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn comment(id: &str, rating: i16) -> comments::Model {
        comments::Model {
            id: id.to_string(),
            username: "13800138000".to_string(),
            movie_id: "m1".to_string(),
            content: "不错".to_string(),
            rating,
        }
    }

    #[test]
    fn test_aggregate_rating() {
        assert_eq!(aggregate_rating([]), (0.0, 0));
        assert_eq!(aggregate_rating([5, 4]), (4.5, 2));
        assert_eq!(aggregate_rating([5, 4, 4]), (4.3, 3));
    }

    #[tokio::test]
    async fn test_get_movie_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movies::Model>::new()])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let err = svc.get_movie("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_screens_inlines_loaded_movie() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_movie("m1")]])
            .append_query_results([vec![sample_screen("s1", "m1"), sample_screen("s2", "m1")]])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let screens = svc.list_screens("m1").await.unwrap();
        assert_eq!(screens.len(), 2);
        assert!(screens.iter().all(|s| s.movie.id == "m1"));
        assert_eq!(screens[1].id, "s2");
    }

    #[tokio::test]
    async fn test_get_screen() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_screen("s1", "m1")]])
            .append_query_results([vec![sample_movie("m1")]])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let screen = svc.get_screen("s1").await.unwrap();
        assert_eq!(screen.movie.name, "千与千寻");
        assert_eq!(screen.playing_type, "2D");
    }

    #[tokio::test]
    async fn test_list_recommends_skips_missing_movies() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                recommends::Model {
                    movie_id: "m1".to_string(),
                },
                recommends::Model {
                    movie_id: "gone".to_string(),
                },
            ]])
            .append_query_results([vec![sample_movie("m1")]])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let list = svc.list_recommends().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].movie_id, "m1");
    }

    #[tokio::test]
    async fn test_add_comment_validates_before_querying() {
        // 无任何预置结果：若发生查询会返回错误
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let svc = CatalogService::new(Arc::new(db));

        for rating in [0, 6] {
            let err = svc
                .add_comment(
                    "13800138000",
                    CreateCommentRequest {
                        movie_id: "m1".to_string(),
                        content: "好看".to_string(),
                        rating,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }

        let err = svc
            .add_comment(
                "13800138000",
                CreateCommentRequest {
                    movie_id: "m1".to_string(),
                    content: "   ".to_string(),
                    rating: 3,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_add_comment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_movie("m1")]])
            .append_query_results([vec![comment("c1", 4)]])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let view = svc
            .add_comment(
                "13800138000",
                CreateCommentRequest {
                    movie_id: "m1".to_string(),
                    content: "不错".to_string(),
                    rating: 4,
                },
            )
            .await
            .unwrap();
        assert_eq!(view.rating, 4);
        assert_eq!(view.username, "13800138000");
    }

    #[tokio::test]
    async fn test_refresh_movie_rating() {
        let refreshed = movies::Model {
            rating: 4.5,
            rating_num: 2,
            ..sample_movie("m1")
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_movie("m1")]])
            .append_query_results([vec![comment("c1", 5), comment("c2", 4)]])
            .append_query_results([vec![refreshed]])
            .into_connection();
        let svc = CatalogService::new(Arc::new(db));

        let view = svc.refresh_movie_rating("m1").await.unwrap();
        assert_eq!(view.rating, 4.5);
        assert_eq!(view.rating_num, 2);
    }
}
