#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Phone {
    pub id: i64,
    pub client_id: i64,
    pub phone_number: Option<String>,
}
