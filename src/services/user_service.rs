use super::catalog_service::{find_movie, load_movies};
use crate::entities::{
    coupon_entity as coupons, favorite_entity as favorites, order_entity as orders,
    user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{generate_entity_id, hash_password, validate_password, validate_phone};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    pool: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(pool: Arc<DatabaseConnection>) -> Self {
        Self { pool }
    }

    /// 创建用户，昵称、余额、头像等使用数据库默认值
    pub async fn create_user(
        &self,
        phone: &str,
        password: &str,
        pay_password: &str,
    ) -> AppResult<UserView> {
        validate_phone(phone)?;
        validate_password(password)?;
        validate_password(pay_password)?;
        self.ensure_phone_available(phone).await?;
        self.insert_user(phone, password, pay_password).await
    }

    /// 手机号未被注册
    pub async fn ensure_phone_available(&self, phone: &str) -> AppResult<()> {
        let existing = users::Entity::find_by_id(phone.to_string())
            .one(self.pool.as_ref())
            .await?;
        if existing.is_some() {
            return Err(phone_taken());
        }
        Ok(())
    }

    pub(crate) async fn insert_user(
        &self,
        phone: &str,
        password: &str,
        pay_password: &str,
    ) -> AppResult<UserView> {
        let inserted = users::ActiveModel {
            id: Set(phone.to_string()),
            password: Set(hash_password(password)?),
            pay_password: Set(hash_password(pay_password)?),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await;

        match inserted {
            Ok(model) => {
                log::info!("User registered: {}", model.id);
                Ok(model.into())
            }
            Err(e) => {
                // 并发注册同一手机号时主键冲突
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                    || self.find_user(phone).await?.is_some()
                {
                    log::warn!("Concurrent registration for {phone} rejected");
                    return Err(phone_taken());
                }
                Err(e.into())
            }
        }
    }

    pub(crate) async fn find_user(&self, phone: &str) -> AppResult<Option<users::Model>> {
        Ok(users::Entity::find_by_id(phone.to_string())
            .one(self.pool.as_ref())
            .await?)
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserView> {
        let user = self
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        Ok(user.into())
    }

    /// 用户订单（按创建时间倒序分页）
    pub async fn list_orders(
        &self,
        user_id: &str,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<OrderView>> {
        let base_query = orders::Entity::find().filter(orders::Column::Username.eq(user_id));

        let total = base_query.clone().count(self.pool.as_ref()).await?;

        let models = base_query
            .order_by_desc(orders::Column::CreateTime)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;
        let items: Vec<OrderView> = models.into_iter().map(OrderView::from).collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    /// 用户优惠券（按过期日期升序）；only_usable 时仅返回未使用且未过期的
    pub async fn list_coupons(&self, user_id: &str, only_usable: bool) -> AppResult<Vec<CouponView>> {
        let list = coupons::Entity::find()
            .filter(coupons::Column::Username.eq(user_id))
            .order_by_asc(coupons::Column::ExpiredTime)
            .all(self.pool.as_ref())
            .await?;

        let today = Utc::now().date_naive();
        Ok(list
            .into_iter()
            .filter(|c| !only_usable || c.is_usable_on(today))
            .map(CouponView::from)
            .collect())
    }

    pub async fn list_favorites(&self, user_id: &str) -> AppResult<Vec<FavoriteView>> {
        let list = favorites::Entity::find()
            .filter(favorites::Column::Username.eq(user_id))
            .order_by_asc(favorites::Column::Id)
            .all(self.pool.as_ref())
            .await?;
        let ids = list.iter().map(|f| f.movie_id.clone()).collect();
        let movie_map = load_movies(self.pool.as_ref(), ids).await?;

        let mut views = Vec::with_capacity(list.len());
        for favorite in list {
            match movie_map.get(&favorite.movie_id) {
                Some(movie) => views.push(FavoriteView::build(favorite, movie)?),
                None => log::warn!("Favorite {} references missing movie", favorite.id),
            }
        }
        Ok(views)
    }

    /// 收藏电影；已收藏时直接返回已有记录
    pub async fn add_favorite(&self, user_id: &str, movie_id: &str) -> AppResult<FavoriteView> {
        let movie = find_movie(self.pool.as_ref(), movie_id).await?;

        let existing = favorites::Entity::find()
            .filter(favorites::Column::Username.eq(user_id))
            .filter(favorites::Column::MovieId.eq(movie_id))
            .one(self.pool.as_ref())
            .await?;
        if let Some(favorite) = existing {
            return FavoriteView::build(favorite, &movie);
        }

        let favorite = favorites::ActiveModel {
            id: Set(generate_entity_id()),
            username: Set(user_id.to_string()),
            movie_id: Set(movie.id.clone()),
        }
        .insert(self.pool.as_ref())
        .await?;

        FavoriteView::build(favorite, &movie)
    }
}

fn phone_taken() -> AppError {
    AppError::ValidationError("Phone number already registered".to_string())
}
