use super::*;
use crate::{model::search::SearchHitKind, server::service::search::SearchService};
use test_utils::factory::{dormitory::DormitoryFactory, user::UserFactory};

/// Tests that very short queries return nothing.
///
/// Expected: Ok with no hits
#[tokio::test]
async fn short_query_returns_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = actor(factory::create_user_with_role(db, "admin").await?);
    DormitoryFactory::new(db).name("M Hall").build().await?;

    let hits = SearchService::new(db).search(&admin, " M ", None).await?;

    assert!(hits.is_empty());

    Ok(())
}

/// Tests that LIKE wildcards in the query match only themselves.
///
/// Expected: Ok with no hits for `%%` and `__`, and the one hall whose name holds `50%`
#[tokio::test]
async fn wildcards_match_literally() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = actor(factory::create_user_with_role(db, "admin").await?);
    DormitoryFactory::new(db).name("Birch Hall").build().await?;
    let discounted = DormitoryFactory::new(db).name("Hall 50% Off").build().await?;
    let service = SearchService::new(db);

    assert!(service.search(&admin, "%%", None).await?.is_empty());
    assert!(service.search(&admin, "__", None).await?.is_empty());

    let hits = service.search(&admin, "50%", None).await?;
    let ids: Vec<_> = hits.iter().map(|h| (h.kind, h.id)).collect();
    assert_eq!(ids, vec![(SearchHitKind::Dormitory, discounted.id)]);

    Ok(())
}

/// Tests that user hits are reserved for administrators.
///
/// Expected: Ok with the dormitory for a student, the dormitory and the user for an admin
#[tokio::test]
async fn users_only_for_administrators() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = actor(factory::create_user_with_role(db, "admin").await?);
    let student = actor(factory::create_user(db).await?);
    let dormitory = DormitoryFactory::new(db).name("Marsh Hall").build().await?;
    let marshall = UserFactory::new(db).last_name("Marshall").build().await?;
    let service = SearchService::new(db);

    let hits = service.search(&student, "Marsh", None).await?;
    let kinds: Vec<_> = hits.iter().map(|h| (h.kind, h.id)).collect();
    assert_eq!(kinds, vec![(SearchHitKind::Dormitory, dormitory.id)]);

    let hits = service.search(&admin, "Marsh", None).await?;
    let kinds: Vec<_> = hits.iter().map(|h| (h.kind, h.id)).collect();
    assert_eq!(
        kinds,
        vec![
            (SearchHitKind::Dormitory, dormitory.id),
            (SearchHitKind::User, marshall.id),
        ]
    );

    Ok(())
}

/// Tests that the limit applies per kind.
///
/// Expected: Ok with two of the three matching dormitories
#[tokio::test]
async fn limits_hits_per_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let student = actor(factory::create_user(db).await?);
    for name in ["Oak Hall", "Oak Lodge", "Oak House"] {
        DormitoryFactory::new(db).name(name).build().await?;
    }

    let hits = SearchService::new(db).search(&student, "Oak", Some(2)).await?;

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|h| h.kind == SearchHitKind::Dormitory));

    Ok(())
}
