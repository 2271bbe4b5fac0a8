//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users and their scrypt credentials.
    users (id) {
        id -> Int8,
        first_name -> Text,
        last_name -> Text,
        /// Lower-cased; unique.
        email -> Varchar,
        /// 64-byte scrypt output.
        password_hash -> Bytea,
        /// 32-byte random salt.
        salt -> Bytea,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Wallets; `(user_id, name)` is unique.
    wallets (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Parties; `(user_id, name)` is unique.
    parties (id) {
        id -> Int8,
        user_id -> Int8,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Transactions. Deleting the referenced wallet or party cascades.
    transactions (id) {
        id -> Int8,
        user_id -> Int8,
        wallet_id -> Int8,
        party_id -> Int8,
        amount -> Int8,
        description -> Nullable<Varchar>,
        occurred_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(wallets -> users (user_id));
diesel::joinable!(parties -> users (user_id));
diesel::joinable!(transactions -> wallets (wallet_id));
diesel::joinable!(transactions -> parties (party_id));

diesel::allow_tables_to_appear_in_same_query!(users, wallets, parties, transactions);
