use axum_checkout_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    models::{NewAddress, NewUser},
    services::auth_service::hash_password,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState::with_orm(config, orm)?;

    let user_id = ensure_user(&state, "Galih", "buyer@example.com", "buyer123").await?;
    seed_addresses(&state, user_id).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    if let Some(existing) = state.users.find_by_email(email).await? {
        println!("User {email} already present");
        return Ok(existing.user.id);
    }

    let user = state
        .users
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        })
        .await?;

    println!("Created user {email}");
    Ok(user.id)
}

async fn seed_addresses(state: &AppState, user_id: i64) -> anyhow::Result<()> {
    if !state.addresses.get_all_address(user_id).await?.is_empty() {
        println!("Addresses already seeded");
        return Ok(());
    }

    let addresses = vec![
        ("Galih", "081234567890", "Jl Buntu 7", "Bangun Rejo", "Pagar Alam Utara", "Pagar Alam", "31513"),
        ("Nando", "082198765432", "Jl Merdeka 12", "Dempo Utara", "Jokoh", "Pagar Alam", "31521"),
    ];

    for (recipient, phone, street, sub_district, urban_village, city, postal_code) in addresses {
        state
            .addresses
            .create_address(
                user_id,
                NewAddress {
                    recipient: recipient.into(),
                    phone: phone.into(),
                    street: street.into(),
                    sub_district: sub_district.into(),
                    urban_village: urban_village.into(),
                    city: city.into(),
                    postal_code: postal_code.into(),
                },
            )
            .await?;
    }

    println!("Seeded addresses");
    Ok(())
}
