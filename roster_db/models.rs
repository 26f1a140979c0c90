use sqlx::FromRow;

#[derive(Debug, FromRow, Clone)]
pub struct Player {
    pub id: i64,
    pub kit_number: String,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub position: String,
}
