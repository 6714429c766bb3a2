//! Seed data: the default category catalogue and an admin account.
//!
//! Both steps skip rows that already exist, so the command can be re-run.

use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use findit_auth::password::PasswordHasher;
use findit_core::error::AppError;
use findit_database::repositories::category::CategoryRepository;
use findit_database::repositories::user::UserRepository;
use findit_entity::category::CreateCategory;
use findit_entity::user::CreateUser;

use crate::output::{self, OutputFormat};

/// Admin account created by the seed.
pub const ADMIN_EMAIL: &str = "admin@findit.com";
const ADMIN_PASSWORD: &str = "admin123";
const ADMIN_NAME: &str = "Admin";
const ADMIN_COUNTRY: &str = "USA";

/// `(name, slug, description)` for every default category.
const DEFAULT_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Web Development", "web-development", "Websites and web applications"),
    ("Mobile Development", "mobile-development", "iOS and Android apps"),
    ("UI/UX Design", "ui-ux-design", "User interface and experience design"),
    ("Graphic Design", "graphic-design", "Logos, branding, and visual design"),
    ("Writing", "writing", "Content writing and copywriting"),
    ("Marketing", "marketing", "Digital marketing and SEO"),
    ("Video Production", "video-production", "Video editing and production"),
    ("Photography", "photography", "Professional photography services"),
    ("Translation", "translation", "Language translation services"),
    ("Data Entry", "data-entry", "Data entry and processing"),
    ("Virtual Assistant", "virtual-assistant", "Administrative support"),
    ("Consulting", "consulting", "Business and technical consulting"),
];

/// One line of the seed report.
#[derive(Debug, Serialize, Tabled)]
pub struct SeedRow {
    /// `category` or `user`.
    pub kind: &'static str,
    /// Slug or email.
    pub key: String,
    /// `created` or `exists`.
    pub status: &'static str,
}

fn status(created: bool) -> &'static str {
    if created { "created" } else { "exists" }
}

/// Insert models for the default categories.
pub fn default_categories() -> Vec<CreateCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, slug, description)| CreateCategory {
            name: (*name).to_string(),
            slug: (*slug).to_string(),
            description: Some((*description).to_string()),
            icon_url: None,
        })
        .collect()
}

/// Execute the seed command
pub async fn execute(env: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(env)?;
    let pool = super::create_db_pool(&config).await?;

    let category_repo = CategoryRepository::new(pool.clone());
    let user_repo = UserRepository::new(pool.clone());

    let mut report = Vec::with_capacity(DEFAULT_CATEGORIES.len() + 1);

    for category in default_categories() {
        let created = category_repo.create_if_absent(&category).await?;
        if created {
            info!(slug = %category.slug, "Seeded category");
        }
        report.push(SeedRow {
            kind: "category",
            key: category.slug,
            status: status(created),
        });
    }

    let admin_created = match user_repo.find_by_email(ADMIN_EMAIL).await? {
        Some(_) => false,
        None => {
            let password_hash = PasswordHasher::new().hash(ADMIN_PASSWORD)?;
            user_repo
                .create(&CreateUser {
                    name: ADMIN_NAME.to_string(),
                    email: ADMIN_EMAIL.to_string(),
                    password_hash,
                    country: Some(ADMIN_COUNTRY.to_string()),
                    is_admin: true,
                })
                .await?;
            info!(email = ADMIN_EMAIL, "Seeded admin account");
            true
        }
    };
    report.push(SeedRow {
        kind: "user",
        key: ADMIN_EMAIL.to_string(),
        status: status(admin_created),
    });

    output::print_list(&report, format);
    output::print_success("Seeding complete.");

    pool.close().await;
    Ok(())
}
