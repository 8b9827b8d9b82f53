//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title as entered.
        title -> Text,
        /// Free-text detail.
        detail -> Text,
        /// Public image URL, empty when no image is attached.
        image_url -> Text,
        /// Completion flag.
        is_completed -> Bool,
    }
}
