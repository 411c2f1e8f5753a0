/// Database row types — these map directly to SQLite rows. Relationship
/// rows use the core's `Edge` type; everything else lives here.

pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub photo_url: String,
    pub created_at: String,
}

pub struct ListRow {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub description: String,
}

pub struct GiftRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub list_id: i64,
    pub claim_status: i64,
    pub claimed_by: String,
}
