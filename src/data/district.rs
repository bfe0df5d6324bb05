use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder, QuerySelect};

pub struct DistrictRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DistrictRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// All district ids, used to enumerate tenants during cache warm-up.
    pub async fn ids(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::District::find()
            .select_only()
            .column(entity::district::Column::Id)
            .order_by_asc(entity::district::Column::Id)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }
}
