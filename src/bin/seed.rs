use course_store_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        courses::{ActiveModel as CourseActive, Column as CourseCol, Entity as Courses},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    middleware::auth::{ROLE_ADMIN, ROLE_USER},
    services::auth_service::hash_password,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_account(&orm, "admin@example.com", "admin123", ROLE_ADMIN).await?;
    let user_id = ensure_account(&orm, "user@example.com", "user123", ROLE_USER).await?;
    seed_courses(&orm, admin_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_account(
    orm: &OrmConn,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("Account {email} already present (role={})", existing.role);
        return Ok(existing.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(if role == ROLE_ADMIN { "Admin" } else { "Demo" }.into()),
        last_name: Set("Account".into()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        newsletter: Set(false),
        dark_mode: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Created {email} (role={role})");
    Ok(user.id)
}

async fn seed_courses(orm: &OrmConn, creator_id: Uuid) -> anyhow::Result<()> {
    let courses = [
        ("Rust from Scratch", "Ownership, borrowing and the type system, one project at a time", 499.0),
        ("Async Rust in Practice", "Futures, tokio and building network services", 799.0),
        ("Web APIs with Axum", "Routing, extractors, middleware and testing", 649.0),
        ("Intro to Git", "Short warm-up course, priced under the card minimum", 19.0),
    ];

    for (title, description, price) in courses {
        let exists = Courses::find()
            .filter(CourseCol::Title.eq(title))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        CourseActive {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            price: Set(price),
            image_url: Set(None),
            creator_id: Set(creator_id),
            created_at: NotSet,
        }
        .insert(orm)
        .await?;
    }

    println!("Seeded courses");
    Ok(())
}
