//! Diesel schema for board and task persistence.

diesel::table! {
    /// Board records, one owner each.
    boards (id) {
        /// Store-assigned board identifier.
        id -> Uuid,
        /// Owning account.
        user_id -> Uuid,
        /// Board name.
        #[max_length = 255]
        name -> Varchar,
        /// Icon glyph.
        #[max_length = 32]
        icon -> Varchar,
        /// Color token.
        #[max_length = 32]
        color -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion order; breaks ties between equal timestamps.
        seq -> Int8,
    }
}

diesel::table! {
    /// Task records belonging to a board.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Owning account.
        user_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Assignee label.
        #[max_length = 255]
        assignee -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// First entry into `inProgress`.
        started_at -> Nullable<Timestamptz>,
        /// Latest entry into `done`.
        completed_at -> Nullable<Timestamptz>,
        /// Rendered duration between start and completion.
        #[max_length = 64]
        duration -> Nullable<Varchar>,
        /// Insertion order; breaks ties between equal timestamps.
        seq -> Int8,
    }
}

diesel::joinable!(tasks -> boards (board_id));
diesel::allow_tables_to_appear_in_same_query!(boards, tasks);
