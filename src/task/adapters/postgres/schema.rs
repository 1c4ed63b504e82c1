//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title text.
        title -> Text,
        /// Description text.
        description -> Text,
        /// Completion flag.
        completed -> Bool,
        /// Priority rank.
        priority -> SmallInt,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Free-text category.
        category -> Text,
        /// Subject rank.
        subject -> SmallInt,
        /// Status column rank.
        status -> SmallInt,
        /// Position within the status column.
        board_order -> Integer,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
