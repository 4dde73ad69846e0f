use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create customer_status enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE wis_platform.customer_status AS ENUM (
                    'pending',
                    'active',
                    'inactive'
                )",
            )
            .await?;

        // Create plan_status enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE wis_platform.plan_status AS ENUM (
                    'active',
                    'completed',
                    'cancelled'
                )",
            )
            .await?;

        // Create conversation_state enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE wis_platform.conversation_state AS ENUM (
                    'active',
                    'paused',
                    'opted_out'
                )",
            )
            .await?;

        // Create onboarding_step enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE wis_platform.onboarding_step AS ENUM (
                    'awaiting_background',
                    'awaiting_life_season'
                )",
            )
            .await?;

        // Customers, with the messaging-state scheduling fields flattened to
        // columns so the scheduler's due-predicates stay indexable. Ids are
        // the opaque keys assigned by the upstream platform services.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TABLE wis_platform.customers (
                    id VARCHAR(64) PRIMARY KEY,
                    phone VARCHAR(20) NOT NULL,
                    status wis_platform.customer_status NOT NULL DEFAULT 'pending',
                    active_plan_id VARCHAR(64),
                    first_name VARCHAR(100),
                    next_plan_message_scheduled_for TIMESTAMP WITH TIME ZONE,
                    next_devotional_scheduled_for TIMESTAMP WITH TIME ZONE,
                    next_check_in_scheduled_for TIMESTAMP WITH TIME ZONE,
                    timezone VARCHAR(64),
                    preferred_time_of_day VARCHAR(32),
                    current_life_season TEXT,
                    extracted_themes JSONB NOT NULL DEFAULT '[]',
                    conversation_state wis_platform.conversation_state NOT NULL DEFAULT 'active',
                    last_devotional_sent_at TIMESTAMP WITH TIME ZONE,
                    onboarding_step wis_platform.onboarding_step,
                    onboarding_step_updated_at TIMESTAMP WITH TIME ZONE,
                    beta_program JSONB,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TABLE wis_platform.devotional_plans (
                    id VARCHAR(64) PRIMARY KEY,
                    customer_id VARCHAR(64) NOT NULL
                        REFERENCES wis_platform.customers (id) ON DELETE CASCADE,
                    plan_number INTEGER,
                    status wis_platform.plan_status NOT NULL DEFAULT 'active',
                    started_at TIMESTAMP WITH TIME ZONE,
                    completed_at TIMESTAMP WITH TIME ZONE,
                    life_season TEXT,
                    themes JSONB NOT NULL DEFAULT '[]',
                    current_day INTEGER,
                    days JSONB NOT NULL DEFAULT '[]',
                    check_in_sent BOOLEAN,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )",
            )
            .await?;

        // Partial indexes matching the three scheduler predicates
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_customers_plan_message_due
                 ON wis_platform.customers (next_plan_message_scheduled_for)
                 WHERE active_plan_id IS NOT NULL",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_customers_recurring_due
                 ON wis_platform.customers (next_devotional_scheduled_for, next_check_in_scheduled_for)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_devotional_plans_customer_id
                 ON wis_platform.devotional_plans (customer_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX idx_devotional_plans_check_in_due
                 ON wis_platform.devotional_plans (status)
                 WHERE check_in_sent IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS wis_platform.devotional_plans")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS wis_platform.customers")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "DROP TYPE IF EXISTS wis_platform.onboarding_step;
                 DROP TYPE IF EXISTS wis_platform.conversation_state;
                 DROP TYPE IF EXISTS wis_platform.plan_status;
                 DROP TYPE IF EXISTS wis_platform.customer_status;",
            )
            .await?;

        Ok(())
    }
}
