//! Brute-force cosine similarity over little-endian f32 blobs.

use rusqlite::{params, Connection};

use shopdesk_core::errors::{ShopdeskResult, StorageError};
use shopdesk_core::models::VectorHit;

use crate::to_storage_err;

/// Insert or replace one embedded passage.
pub fn upsert_vector(
    conn: &Connection,
    collection: &str,
    id: &str,
    embedding: &[f32],
    content: &str,
    metadata: &serde_json::Map<String, serde_json::Value>,
) -> ShopdeskResult<()> {
    let metadata_json = serde_json::to_string(metadata)?;
    conn.execute(
        "INSERT INTO vector_entries (collection, entry_id, embedding, dimensions, content, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(collection, entry_id) DO UPDATE SET
            embedding = excluded.embedding,
            dimensions = excluded.dimensions,
            content = excluded.content,
            metadata = excluded.metadata,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            collection,
            id,
            f32_vec_to_bytes(embedding),
            embedding.len() as i64,
            content,
            metadata_json
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Rank every entry of `collection` against `query_embedding`.
/// Entries with a different dimensionality are skipped.
pub fn search_vectors(
    conn: &Connection,
    collection: &str,
    query_embedding: &[f32],
    limit: usize,
) -> ShopdeskResult<Vec<VectorHit>> {
    let query_norm_sq: f64 = query_embedding.iter().map(|x| (*x as f64) * (*x as f64)).sum();
    if query_norm_sq == 0.0 || limit == 0 {
        return Ok(vec![]);
    }

    let mut stmt = conn
        .prepare(
            "SELECT entry_id, embedding, dimensions, content, metadata
             FROM vector_entries WHERE collection = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![collection], |row| {
            let id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            let dims: i64 = row.get(2)?;
            let content: String = row.get(3)?;
            let metadata: String = row.get(4)?;
            Ok((id, blob, dims, content, metadata))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scored = Vec::new();
    for row in rows {
        let (id, blob, dims, content, metadata) = row.map_err(|e| to_storage_err(e.to_string()))?;
        if dims as usize != query_embedding.len() {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let score = cosine_similarity(query_embedding, &stored);
        let metadata = match serde_json::from_str::<serde_json::Value>(&metadata) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => {
                return Err(StorageError::VectorIndex {
                    reason: format!("entry {id} has non-object metadata"),
                }
                .into())
            }
        };
        scored.push(VectorHit {
            id,
            score,
            content,
            metadata,
        });
    }

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    Ok(scored)
}

pub fn vector_count(conn: &Connection, collection: &str) -> ShopdeskResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM vector_entries WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

pub fn bytes_to_f32_vec(bytes: &[u8], dims: usize) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .take(dims)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
