//! Diesel schema for board persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Position of the row in the saved table.
        seq -> Int8,
        /// Display name.
        name -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board column records.
    #[sql_name = "columns"]
    board_columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Position of the row in the saved table.
        seq -> Int8,
        /// Owning project.
        project_id -> Uuid,
        /// Display name.
        name -> Text,
        /// Left-to-right position within the project.
        #[sql_name = "order"]
        position -> Int4,
        /// Row creation timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Position of the row in the saved table.
        seq -> Int8,
        /// Owning project.
        project_id -> Uuid,
        /// Column the task is placed in.
        column_id -> Uuid,
        /// Title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional assignee developer identifier.
        assignee -> Nullable<Text>,
        /// Priority, one of `low`, `medium`, `high`, `urgent`.
        #[max_length = 16]
        priority -> Varchar,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(board_columns -> projects (project_id));
diesel::joinable!(tasks -> board_columns (column_id));

diesel::allow_tables_to_appear_in_same_query!(projects, board_columns, tasks);
