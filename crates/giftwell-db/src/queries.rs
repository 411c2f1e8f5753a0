use crate::Database;
use crate::models::{GiftRow, ListRow, UserRow};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        id: &str,
        email: &str,
        password_hash: &str,
        display_name: &str,
        photo_url: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, password, display_name, photo_url)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (id, email, password_hash, display_name, photo_url),
            )?;
            Ok(())
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", email))
    }

    pub fn user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    // -- Lists --

    pub fn create_list(&self, name: &str, owner: &str, description: &str) -> Result<ListRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO lists (name, owner, description) VALUES (?1, ?2, ?3)",
                (name, owner, description),
            )?;
            Ok(ListRow {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                owner: owner.to_string(),
                description: description.to_string(),
            })
        })
    }

    pub fn lists_for_owner(&self, owner: &str) -> Result<Vec<ListRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, name, owner, description FROM lists WHERE owner = ?1")?;
            let rows = stmt
                .query_map([owner], list_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_by_id(&self, id: i64) -> Result<Option<ListRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, owner, description FROM lists WHERE id = ?1",
                    [id],
                    list_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_owner(&self, id: i64) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let owner = conn
                .query_row("SELECT owner FROM lists WHERE id = ?1", [id], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(owner)
        })
    }

    pub fn update_list(&self, id: i64, name: &str, description: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE lists SET name = ?1, description = ?2 WHERE id = ?3",
                (name, description, id),
            )?;
            Ok(())
        })
    }

    /// Gifts go with the list via the FK cascade.
    pub fn delete_list(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM lists WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    // -- Gifts --

    pub fn create_gift(
        &self,
        list_id: i64,
        name: &str,
        description: &str,
        url: &str,
        image_url: &str,
    ) -> Result<GiftRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO gifts (name, description, url, image_url, list_id, claim_status, claimed_by)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, '')",
                (name, description, url, image_url, list_id),
            )?;
            Ok(GiftRow {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                description: description.to_string(),
                url: url.to_string(),
                image_url: image_url.to_string(),
                list_id,
                claim_status: 0,
                claimed_by: String::new(),
            })
        })
    }

    pub fn gift_by_id(&self, id: i64) -> Result<Option<GiftRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, name, description, url, image_url, list_id, claim_status, claimed_by
                     FROM gifts WHERE id = ?1",
                    [id],
                    gift_from_row,
                )
                .optional()?;
            Ok(row)
        })
    }

    pub fn gifts_for_list(&self, list_id: i64) -> Result<Vec<GiftRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, url, image_url, list_id, claim_status, claimed_by
                 FROM gifts WHERE list_id = ?1",
            )?;
            let rows = stmt
                .query_map([list_id], gift_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_gift(
        &self,
        id: i64,
        name: &str,
        description: &str,
        url: &str,
        image_url: &str,
    ) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE gifts SET name = ?1, description = ?2, url = ?3, image_url = ?4
                 WHERE id = ?5",
                (name, description, url, image_url, id),
            )?;
            Ok(())
        })
    }

    pub fn delete_gift(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM gifts WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is always a literal from this module, never caller input.
    let sql = format!(
        "SELECT id, email, password, display_name, photo_url, created_at
         FROM users WHERE {} = ?1",
        column
    );
    let row = conn
        .query_row(&sql, [value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                display_name: row.get(3)?,
                photo_url: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;
    Ok(row)
}

fn list_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ListRow> {
    Ok(ListRow {
        id: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        description: row.get(3)?,
    })
}

fn gift_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GiftRow> {
    Ok(GiftRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        url: row.get(3)?,
        image_url: row.get(4)?,
        list_id: row.get(5)?,
        claim_status: row.get(6)?,
        claimed_by: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::Database;

    #[test]
    fn list_crud_roundtrip() {
        let db = Database::open_in_memory().unwrap();

        let list = db.create_list("Birthday", "alice", "things I want").unwrap();
        assert_eq!(db.list_owner(list.id).unwrap().as_deref(), Some("alice"));

        db.update_list(list.id, "Birthday 2026", "updated").unwrap();
        let loaded = db.list_by_id(list.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Birthday 2026");
        assert_eq!(loaded.description, "updated");

        assert!(db.delete_list(list.id).unwrap());
        assert!(!db.delete_list(list.id).unwrap());
        assert!(db.list_by_id(list.id).unwrap().is_none());
    }

    #[test]
    fn deleting_a_list_cascades_to_gifts() {
        let db = Database::open_in_memory().unwrap();

        let list = db.create_list("Birthday", "alice", "").unwrap();
        let gift = db
            .create_gift(list.id, "Socks", "warm", "http://shop/socks", "")
            .unwrap();
        assert_eq!(db.gifts_for_list(list.id).unwrap().len(), 1);

        db.delete_list(list.id).unwrap();
        assert!(db.gift_by_id(gift.id).unwrap().is_none());
    }

    #[test]
    fn gift_updates_leave_claim_untouched() {
        let db = Database::open_in_memory().unwrap();

        let list = db.create_list("Birthday", "alice", "").unwrap();
        let gift = db.create_gift(list.id, "Socks", "", "", "").unwrap();

        db.with_conn(|conn| {
            conn.execute(
                "UPDATE gifts SET claim_status = 1, claimed_by = 'bob' WHERE id = ?1",
                [gift.id],
            )?;
            Ok(())
        })
        .unwrap();

        db.update_gift(gift.id, "Wool socks", "warm", "", "").unwrap();
        let loaded = db.gift_by_id(gift.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Wool socks");
        assert_eq!(loaded.claim_status, 1);
        assert_eq!(loaded.claimed_by, "bob");
    }

    #[test]
    fn user_lookup_by_email_and_id() {
        let db = Database::open_in_memory().unwrap();

        db.create_user("u1", "alice@example.com", "hash", "Alice", "")
            .unwrap();

        let by_email = db.user_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, "u1");
        assert_eq!(by_email.display_name, "Alice");

        let by_id = db.user_by_id("u1").unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");

        assert!(db.user_by_email("nobody@example.com").unwrap().is_none());

        // Emails are unique.
        assert!(
            db.create_user("u2", "alice@example.com", "hash", "Imposter", "")
                .is_err()
        );
    }
}
