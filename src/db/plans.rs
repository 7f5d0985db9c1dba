use rusqlite::{Connection, OptionalExtension, Row, Transaction};
use uuid::Uuid;

use super::users::require_user_exists;
use super::{format_datetime, now, parse_datetime, parse_uuid, Database};
use crate::error::{require_text, Result, SocialError};
use crate::models::*;

const PLAN_COLUMNS: &str =
    "id, user_id, title, description, target_completion_date, status, created_at, updated_at";

fn row_to_plan(row: &Row) -> rusqlite::Result<LearningPlan> {
    Ok(LearningPlan {
        id: parse_uuid(row.get::<_, String>(0)?),
        user_id: parse_uuid(row.get::<_, String>(1)?),
        title: row.get(2)?,
        description: row.get(3)?,
        target_completion_date: row.get::<_, Option<String>>(4)?.map(parse_datetime),
        status: PlanStatus::from_str(&row.get::<_, String>(5)?).unwrap_or_default(),
        steps: Vec::new(),
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn select_steps(conn: &Connection, plan_id: Uuid) -> Result<Vec<LearningStep>> {
    let mut stmt = conn.prepare(
        "SELECT id, plan_id, title, description, resource_url, order_index, status
         FROM learning_steps WHERE plan_id = ? ORDER BY order_index",
    )?;
    let steps = stmt
        .query_map([plan_id.to_string()], |row| {
            Ok(LearningStep {
                id: parse_uuid(row.get::<_, String>(0)?),
                plan_id: parse_uuid(row.get::<_, String>(1)?),
                title: row.get(2)?,
                description: row.get(3)?,
                resource_url: row.get(4)?,
                order_index: row.get(5)?,
                status: StepStatus::from_str(&row.get::<_, String>(6)?).unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(steps)
}

fn select_plan(conn: &Connection, id: Uuid) -> Result<Option<LearningPlan>> {
    let plan = conn
        .query_row(
            &format!("SELECT {PLAN_COLUMNS} FROM learning_plans WHERE id = ?"),
            [id.to_string()],
            row_to_plan,
        )
        .optional()?;

    match plan {
        Some(mut plan) => {
            plan.steps = select_steps(conn, plan.id)?;
            Ok(Some(plan))
        }
        None => Ok(None),
    }
}

/// Write `inputs` as the plan's steps. `order_index` is the position in the
/// list; whatever the caller put in `LearningStepInput::order_index` is
/// discarded.
fn insert_steps(
    tx: &Transaction,
    plan_id: Uuid,
    inputs: Vec<LearningStepInput>,
) -> Result<Vec<LearningStep>> {
    let mut steps = Vec::with_capacity(inputs.len());
    for (position, input) in inputs.into_iter().enumerate() {
        let step = LearningStep {
            id: Uuid::new_v4(),
            plan_id,
            title: input.title,
            description: input.description,
            resource_url: input.resource_url,
            order_index: position as i64,
            status: input.status.unwrap_or_default(),
        };

        tx.execute(
            "INSERT INTO learning_steps (id, plan_id, title, description, resource_url, order_index, status)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                step.id.to_string(),
                plan_id.to_string(),
                &step.title,
                &step.description,
                &step.resource_url,
                step.order_index,
                step.status.as_str(),
            ),
        )?;
        steps.push(step);
    }
    Ok(steps)
}

fn validate(input: &LearningPlanInput) -> Result<()> {
    require_text("title", &input.title)?;
    for step in &input.steps {
        require_text("step title", &step.title)?;
    }
    Ok(())
}

impl Database {
    // ============================================================
    // Learning plans
    // ============================================================

    pub fn create_plan(&self, owner_id: Uuid, input: LearningPlanInput) -> Result<LearningPlan> {
        validate(&input)?;

        let mut conn = self.conn()?;
        require_user_exists(&conn, owner_id)?;

        let id = Uuid::new_v4();
        let now = now();
        let status = input.status.unwrap_or_default();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO learning_plans (id, user_id, title, description, target_completion_date, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                owner_id.to_string(),
                &input.title,
                &input.description,
                input.target_completion_date.map(format_datetime),
                status.as_str(),
                format_datetime(now),
                format_datetime(now),
            ),
        )?;
        let steps = insert_steps(&tx, id, input.steps)?;
        tx.commit()?;

        Ok(LearningPlan {
            id,
            user_id: owner_id,
            title: input.title,
            description: input.description,
            target_completion_date: input.target_completion_date,
            status,
            steps,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_plan(&self, id: Uuid) -> Result<Option<LearningPlan>> {
        let conn = self.conn()?;
        select_plan(&conn, id)
    }

    pub fn require_plan(&self, id: Uuid) -> Result<LearningPlan> {
        self.get_plan(id)?
            .ok_or(SocialError::NotFound("Learning plan"))
    }

    /// Overwrite a plan's fields and replace its step list.
    pub fn replace_plan(&self, id: Uuid, input: LearningPlanInput) -> Result<LearningPlan> {
        validate(&input)?;

        let mut conn = self.conn()?;
        let existing = select_plan(&conn, id)?.ok_or(SocialError::NotFound("Learning plan"))?;

        let now = now();
        let status = input.status.unwrap_or(existing.status);

        let tx = conn.transaction()?;
        tx.execute(
            "UPDATE learning_plans SET title = ?, description = ?, target_completion_date = ?, status = ?, updated_at = ?
             WHERE id = ?",
            (
                &input.title,
                &input.description,
                input.target_completion_date.map(format_datetime),
                status.as_str(),
                format_datetime(now),
                id.to_string(),
            ),
        )?;
        tx.execute("DELETE FROM learning_steps WHERE plan_id = ?", [id.to_string()])?;
        let steps = insert_steps(&tx, id, input.steps)?;
        tx.commit()?;

        Ok(LearningPlan {
            id,
            user_id: existing.user_id,
            title: input.title,
            description: input.description,
            target_completion_date: input.target_completion_date,
            status,
            steps,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    pub fn delete_plan(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM learning_steps WHERE plan_id = ?", [id.to_string()])?;
        let rows = tx.execute("DELETE FROM learning_plans WHERE id = ?", [id.to_string()])?;
        tx.commit()?;
        Ok(rows > 0)
    }

    /// All plans newest first, or only `owner_id`'s when given.
    pub fn list_plans(
        &self,
        owner_id: Option<Uuid>,
        request: PageRequest,
    ) -> Result<Page<LearningPlan>> {
        let conn = self.conn()?;
        let owner = owner_id.map(|id| id.to_string());

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM learning_plans WHERE ?1 IS NULL OR user_id = ?1",
            [&owner],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAN_COLUMNS} FROM learning_plans
             WHERE ?1 IS NULL OR user_id = ?1
             ORDER BY created_at DESC, rowid DESC LIMIT ?2 OFFSET ?3"
        ))?;
        let mut plans = stmt
            .query_map((&owner, request.limit(), request.offset()), row_to_plan)?
            .collect::<Result<Vec<_>, _>>()?;

        for plan in &mut plans {
            plan.steps = select_steps(&conn, plan.id)?;
        }

        Ok(Page::new(plans, request, total))
    }
}
