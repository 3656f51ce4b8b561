//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DocumentStore` port from the `core` crate. Documents live as JSONB rows
//! of a single `documents` table in PostgreSQL, accessed through `sqlx`. Filtering,
//! ordering and counter increments follow the same rules as the in-memory store.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgPool};
use tutorhub_core::domain::{
    Collection, DeleteOutcome, Document, Filter, FindOptions, InsertOutcome, SortDirection,
    UpdateOutcome, ID_FIELD,
};
use tutorhub_core::ports::{DocumentStore, PortError, PortResult};
use uuid::Uuid;

use super::next_counter_value;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DocumentStore` port.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct DocumentRecord {
    id: String,
    body: Json<Value>,
}
impl DocumentRecord {
    fn to_domain(self) -> Document {
        let mut doc = match self.body.0 {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        doc.insert(ID_FIELD.to_string(), Value::String(self.id));
        doc
    }
}

#[derive(FromRow)]
struct UpdateCountsRecord {
    matched: i64,
    modified: i64,
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

/// Strips the identifier so it never ends up inside the JSONB body.
fn without_id(mut doc: Document) -> Value {
    doc.remove(ID_FIELD);
    Value::Object(doc)
}

//=========================================================================================
// Find Query Construction
//=========================================================================================

/// A positional argument of a dynamically built statement.
#[derive(Debug, Clone, PartialEq)]
enum SqlArg {
    Text(String),
    Json(Value),
}

#[derive(Debug)]
struct FindQuery {
    sql: String,
    args: Vec<SqlArg>,
}

impl FindQuery {
    fn push(&mut self, arg: SqlArg) -> usize {
        self.args.push(arg);
        self.args.len()
    }
}

/// Builds the `SELECT` for a find.
///
/// Filter fields compare with JSONB equality, so numbers match by value and
/// arrays or objects must match exactly. A `null` condition also matches a
/// document that lacks the field. Sorting ranks values by type first
/// (absent/null, numbers, strings, objects, arrays, booleans), then by value
/// within numbers, booleans and strings, and keeps insertion order on ties.
fn build_find_query(collection: Collection, filter: &Filter, options: &FindOptions) -> FindQuery {
    let mut query = FindQuery {
        sql: String::new(),
        args: Vec::new(),
    };
    let mut clauses = vec![format!(
        "collection = ${}",
        query.push(SqlArg::Text(collection.name().to_string()))
    )];

    for (field, expected) in filter.conditions() {
        let field_arg = query.push(SqlArg::Text(field.clone()));
        if expected.is_null() {
            clauses.push(format!(
                "COALESCE(body -> ${}, 'null'::jsonb) = 'null'::jsonb",
                field_arg
            ));
        } else {
            let value_arg = query.push(SqlArg::Json(expected.clone()));
            clauses.push(format!("body -> ${} = ${}", field_arg, value_arg));
        }
    }

    let order_by = match &options.sort {
        Some(sort) => {
            let f = query.push(SqlArg::Text(sort.field.clone()));
            let dir = match sort.direction {
                SortDirection::Ascending => "ASC",
                SortDirection::Descending => "DESC",
            };
            format!(
                "CASE COALESCE(jsonb_typeof(body -> ${f}), 'null') \
                     WHEN 'null' THEN 0 WHEN 'number' THEN 1 WHEN 'string' THEN 2 \
                     WHEN 'object' THEN 3 WHEN 'array' THEN 4 ELSE 5 END {dir}, \
                 CASE WHEN jsonb_typeof(body -> ${f}) IN ('number', 'boolean') THEN body -> ${f} END {dir}, \
                 (CASE WHEN jsonb_typeof(body -> ${f}) = 'string' THEN body ->> ${f} END) COLLATE \"C\" {dir}, \
                 seq ASC"
            )
        }
        None => "seq ASC".to_string(),
    };

    query.sql = format!(
        "SELECT id, body FROM documents WHERE {} ORDER BY {}",
        clauses.join(" AND "),
        order_by
    );
    query
}

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> PortResult<Vec<Document>> {
        let FindQuery { sql, args } = build_find_query(collection, filter, options);
        let mut query = sqlx::query_as::<_, DocumentRecord>(&sql);
        for arg in args {
            query = match arg {
                SqlArg::Text(text) => query.bind(text),
                SqlArg::Json(value) => query.bind(Json(value)),
            };
        }

        let records = query.fetch_all(&self.pool).await.map_err(unexpected)?;
        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> PortResult<Option<Document>> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(record.map(|r| r.to_domain()))
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> PortResult<InsertOutcome> {
        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(&id)
            .bind(collection.name())
            .bind(Json(without_id(document)))
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> PortResult<UpdateOutcome> {
        let counts = sqlx::query_as::<_, UpdateCountsRecord>(
            r#"
            WITH target AS (
                SELECT id FROM documents WHERE collection = $1 AND id = $2
            ),
            updated AS (
                UPDATE documents
                SET body = body || $3
                WHERE collection = $1 AND id = $2 AND body <> body || $3
                RETURNING id
            )
            SELECT (SELECT COUNT(*) FROM target) AS matched,
                   (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(collection.name())
        .bind(id)
        .bind(Json(without_id(fields)))
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: counts.matched as u64,
            modified_count: counts.modified as u64,
        })
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> PortResult<DeleteOutcome> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.rows_affected(),
        })
    }

    async fn increment_by_id(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
    ) -> PortResult<Option<i64>> {
        // The row lock keeps the read and the write of the counter atomic.
        let mut tx = self.pool.begin().await.map_err(unexpected)?;
        let current = sqlx::query_scalar::<_, Option<Json<Value>>>(
            "SELECT body -> $3 FROM documents WHERE collection = $1 AND id = $2 FOR UPDATE",
        )
        .bind(collection.name())
        .bind(id)
        .bind(field)
        .fetch_optional(&mut *tx)
        .await
        .map_err(unexpected)?;

        let Some(current) = current else {
            return Ok(None);
        };
        let next = next_counter_value(field, current.as_ref().map(|json| &json.0))?;

        sqlx::query(
            "UPDATE documents SET body = jsonb_set(body, ARRAY[$3], $4) WHERE collection = $1 AND id = $2",
        )
        .bind(collection.name())
        .bind(id)
        .bind(field)
        .bind(Json(Value::from(next)))
        .execute(&mut *tx)
        .await
        .map_err(unexpected)?;
        tx.commit().await.map_err(unexpected)?;

        Ok(Some(next))
    }
}
