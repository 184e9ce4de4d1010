//! Migration v2: enforce a single active goal per user.
//!
//! Older rows may carry several active goals; keep the newest one and
//! deactivate the rest before creating the partial unique index.

pub(super) const SQL: &str = "
WITH ranked AS (
    SELECT
        id,
        user_id,
        ROW_NUMBER() OVER (
            PARTITION BY user_id
            ORDER BY created_at DESC, id DESC
        ) AS rn
    FROM goals
    WHERE is_active = 1
)
UPDATE goals
SET is_active = 0
WHERE id IN (SELECT id FROM ranked WHERE rn > 1);

CREATE UNIQUE INDEX IF NOT EXISTS uq_goals_active_per_user
    ON goals(user_id) WHERE is_active = 1;
";
