//! Repository checks against a real PostgreSQL. Run with `DATABASE_URL` set
//! and `--ignored`.

use contact_service::{
    db,
    models::{NewAddress, NewContact, NewUser, PageRequest},
    repositories::{
        AddressRepository, ContactRepository, CredentialStore, PgAddressRepository,
        PgContactRepository, PgUserStore, UserRepository,
    },
    utils::{generate_token, hash_password, Password},
};
use service_core::error::AppError;
use sqlx::PgPool;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("connect");
    db::run_migrations(&pool).await.expect("migrations");
    pool
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, &generate_token()[..12])
}

async fn new_user(store: &PgUserStore, prefix: &str) -> i64 {
    let hash = hash_password(&Password::new("secret123")).expect("hash");
    store
        .insert(NewUser {
            name: "Test User".to_string(),
            email: unique_email(prefix),
            password_hash: hash,
        })
        .await
        .expect("insert user")
        .id
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn duplicate_email_is_a_conflict() {
    let store = PgUserStore::new(pool().await);
    let email = unique_email("dup");
    let hash = hash_password(&Password::new("secret123")).expect("hash");

    store
        .insert(NewUser {
            name: "First".to_string(),
            email: email.clone(),
            password_hash: hash.clone(),
        })
        .await
        .expect("first insert");
    let err = store
        .insert(NewUser {
            name: "Second".to_string(),
            email,
            password_hash: hash,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn token_round_trips_through_the_users_table() {
    let store = PgUserStore::new(pool().await);
    let id = new_user(&store, "token").await;
    let token = generate_token();

    assert!(store.store_token(id, &token).await.expect("store"));
    let found = store.find_by_token(&token).await.expect("lookup").expect("user");
    assert_eq!(found.id, id);
    assert!(!store.store_token(-1, &token).await.expect("store"));
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn contacts_and_addresses_are_scoped_by_owner() {
    let pool = pool().await;
    let users = PgUserStore::new(pool.clone());
    let contacts = PgContactRepository::new(pool.clone());
    let addresses = PgAddressRepository::new(pool);

    let owner = new_user(&users, "owner").await;
    let stranger = new_user(&users, "stranger").await;

    let contact = contacts
        .insert(NewContact {
            user_id: owner,
            first_name: "Charles".to_string(),
            last_name: None,
            email: "cb@example.com".to_string(),
            phone: Some("555_0100".to_string()),
        })
        .await
        .expect("insert contact");

    assert!(contacts.find(contact.id, stranger).await.expect("find").is_none());
    assert!(!contacts.delete(contact.id, stranger).await.expect("delete"));

    let literal = contacts
        .list(owner, PageRequest::default(), Some("5_0"))
        .await
        .expect("list");
    assert_eq!(literal.total, 1);
    let wildcard = contacts
        .list(owner, PageRequest::default(), Some("5%0"))
        .await
        .expect("list");
    assert_eq!(wildcard.total, 0);

    let address = addresses
        .insert(NewAddress {
            contact_id: contact.id,
            street: None,
            city: Some("London".to_string()),
            state: None,
            postal_code: None,
            country: "UK".to_string(),
        })
        .await
        .expect("insert address");

    assert!(addresses.find(address.id, stranger).await.expect("find").is_none());
    let mut moved = address.clone();
    moved.city = Some("Paris".to_string());
    assert!(addresses.update(stranger, &moved).await.expect("update").is_none());
    let updated = addresses
        .update(owner, &moved)
        .await
        .expect("update")
        .expect("owned");
    assert_eq!(updated.city.as_deref(), Some("Paris"));

    assert!(UserRepository::delete(&users, owner).await.expect("delete user"));
    assert!(addresses.find(address.id, owner).await.expect("find").is_none());
}
