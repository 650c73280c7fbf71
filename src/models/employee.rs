#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub emp_id: String,
    pub first_name: String,
    pub last_name: String,
    pub primary_skill: String,
    pub location: String,
}
