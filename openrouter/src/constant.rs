//! Model & endpoint constants
//!
//! These constants cover the well-known OpenAI-compatible base URLs plus the
//! model identifiers this crate defaults to. Users can always pass custom
//! strings for other models.

/// [`OpenRouter`](https://openrouter.ai)'s OpenAI-compatible base URL.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default `OpenAI` API base URL (chat, embeddings, etc.).
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

// ============================================================
// 1. CHAT MODELS
// ============================================================

/// Free Devstral tier on `OpenRouter`, suitable for grounded Q&A.
pub const DEVSTRAL_FREE: &str = "mistralai/devstral-2512:free";

/// Mistral Small on `OpenRouter`.
pub const MISTRAL_SMALL: &str = "mistralai/mistral-small";

// ============================================================
// 2. EMBEDDING MODELS
// ============================================================

/// Small + inexpensive embedding model (1536-dim).
pub const EMBEDDING_SMALL: &str = "text-embedding-3-small";

/// High-accuracy embedding model (3072-dim).
pub const EMBEDDING_LARGE: &str = "text-embedding-3-large";

/// Legacy embedding model (kept for backward compatibility).
pub const EMBEDDING_ADA002: &str = "text-embedding-ada-002";

/// Compact sentence-transformer (384-dim), common on self-hosted
/// OpenAI-compatible embedding servers.
pub const MINILM_L6_V2: &str = "sentence-transformers/all-MiniLM-L6-v2";
