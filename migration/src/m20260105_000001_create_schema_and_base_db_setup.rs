use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS wis_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO wis_platform, public;")
            .await?;

        // Create the base DB user privileges that will execute all
        // orchestrator queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE wis TO wis;
                    GRANT ALL ON SCHEMA wis_platform TO wis;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform GRANT ALL ON TABLES TO wis;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform GRANT ALL ON SEQUENCES TO wis;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform GRANT ALL ON FUNCTIONS TO wis;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform REVOKE ALL ON FUNCTIONS FROM wis;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform REVOKE ALL ON SEQUENCES FROM wis;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA wis_platform REVOKE ALL ON TABLES FROM wis;
                    REVOKE ALL ON SCHEMA wis_platform FROM wis;
                    REVOKE ALL PRIVILEGES ON DATABASE wis FROM wis;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS wis_platform CASCADE;")
            .await?;

        Ok(())
    }
}
