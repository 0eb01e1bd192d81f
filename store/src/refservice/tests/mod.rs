//! This contains test scenarios that a given [RefService] needs to pass.
//! We use [rstest] and [rstest_reuse] to provide all services we want to test
//! against, and then apply this template to all test functions.

use rstest::*;
use rstest_reuse::{self, *};
use uuid::Uuid;
use verso_castore::fixtures::{DUMMY_DIGEST, DUMMY_DIGEST_2};
use verso_castore::Error;

use super::{MemoryRefService, Ref, RefService};
use crate::refservice;

#[template]
#[rstest]
#[case::memory(MemoryRefService::default())]
#[case::memory_from_addr(refservice::from_addr("memory://").await.unwrap())]
pub fn ref_services(#[case] ref_service: impl RefService) {}

#[apply(ref_services)]
#[tokio::test]
async fn test_non_exist(ref_service: impl RefService) {
    assert_eq!(Ok(None), ref_service.get(&Uuid::new_v4()).await);
    assert_eq!(
        Ok(None),
        ref_service.get_by_name(&Uuid::new_v4(), "main").await
    );
}

#[apply(ref_services)]
#[tokio::test]
async fn insert_get(ref_service: impl RefService) {
    let repository_id = Uuid::new_v4();
    let r = ref_service
        .insert(Ref::new(repository_id, "main"))
        .await
        .expect("must succeed");

    assert_eq!(Ok(Some(r.clone())), ref_service.get(&r.id).await);
    assert_eq!(
        Ok(Some(r.clone())),
        ref_service.get_by_name(&repository_id, "main").await
    );
    // names are scoped to a repository.
    assert_eq!(
        Ok(None),
        ref_service.get_by_name(&Uuid::new_v4(), "main").await
    );
}

#[apply(ref_services)]
#[tokio::test]
async fn insert_duplicate(ref_service: impl RefService) {
    let repository_id = Uuid::new_v4();
    let r = ref_service
        .insert(Ref::new(repository_id, "main"))
        .await
        .unwrap();

    assert!(matches!(
        ref_service.insert(r.clone()).await,
        Err(Error::Conflict(_))
    ));
    assert!(matches!(
        ref_service.insert(Ref::new(repository_id, "main")).await,
        Err(Error::Conflict(_))
    ));

    // the same name in another repository is fine.
    ref_service
        .insert(Ref::new(Uuid::new_v4(), "main"))
        .await
        .expect("must succeed");
}

#[apply(ref_services)]
#[tokio::test]
async fn compare_and_set(ref_service: impl RefService) {
    let r = ref_service
        .insert(Ref::new(Uuid::new_v4(), "main"))
        .await
        .unwrap();

    let moved = ref_service
        .compare_and_set(&r.id, None, DUMMY_DIGEST.clone())
        .await
        .expect("must succeed");
    assert_eq!(Some(DUMMY_DIGEST.clone()), moved.commit);

    // a stale expectation doesn't move the ref.
    assert!(matches!(
        ref_service
            .compare_and_set(&r.id, None, DUMMY_DIGEST_2.clone())
            .await,
        Err(Error::Conflict(_))
    ));
    assert_eq!(
        Some(DUMMY_DIGEST.clone()),
        ref_service.get(&r.id).await.unwrap().unwrap().commit
    );

    ref_service
        .compare_and_set(&r.id, Some(&*DUMMY_DIGEST), DUMMY_DIGEST_2.clone())
        .await
        .expect("must succeed");
    assert_eq!(
        Some(DUMMY_DIGEST_2.clone()),
        ref_service.get(&r.id).await.unwrap().unwrap().commit
    );
}

#[apply(ref_services)]
#[tokio::test]
async fn compare_and_set_missing(ref_service: impl RefService) {
    assert!(matches!(
        ref_service
            .compare_and_set(&Uuid::new_v4(), None, DUMMY_DIGEST.clone())
            .await,
        Err(Error::NotFound(_))
    ));
}
