//! This contains test scenarios that a given [ObjectService] needs to pass.
//! We use [rstest] and [rstest_reuse] to provide all services we want to test
//! against, and then apply this template to all test functions.

use prost::Message;
use rstest::*;
use rstest_reuse::{self, *};

use super::ObjectService;
use crate::fixtures::{BLOB_A, BLOB_B, TREE_A, TREE_B};
use crate::objectservice::{self, MemoryObjectService};
use crate::{proto, Blob, Error, Object, ObjectType, TreeNode, EMPTY_TREE_DIGEST};

/// This produces a template, which will be applied to all individual test functions.
/// See https://github.com/la10736/rstest/issues/130#issuecomment-968864832
#[template]
#[rstest]
#[case::memory(MemoryObjectService::default())]
#[case::memory_from_addr(objectservice::from_addr("memory://").await.unwrap())]
pub fn object_services(#[case] object_service: impl ObjectService) {}

/// Ensures asking for an object that doesn't exist returns a Ok(None).
#[apply(object_services)]
#[tokio::test]
async fn test_non_exist(object_service: impl ObjectService) {
    assert_eq!(Ok(None), object_service.get(BLOB_A.digest()).await);
    assert_eq!(Ok(false), object_service.has(BLOB_A.digest()).await);
}

/// Putting a single object into the store, and then getting it out should
/// work, and return the digest it's addressed by.
#[apply(object_services)]
#[tokio::test]
async fn put_get(object_service: impl ObjectService) {
    let digest = object_service
        .put(Object::Tree(TREE_A.clone()))
        .await
        .unwrap();
    assert_eq!(TREE_A.digest(), digest, "returned digest must match");

    assert_eq!(
        Some(Object::Tree(TREE_A.clone())),
        object_service.get(&digest).await.unwrap()
    );
    assert_eq!(Ok(true), object_service.has(&digest).await);
}

/// Putting the same object twice succeeds, and the first write wins.
#[apply(object_services)]
#[tokio::test]
async fn put_twice(object_service: impl ObjectService) {
    let first = object_service.put(BLOB_B.clone().into()).await.unwrap();
    let stored = object_service.get(&first).await.unwrap();

    let second = object_service.put(BLOB_B.clone().into()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(stored, object_service.get(&second).await.unwrap());
}

/// A blob whose contents are the typed encoding of a tree shares the tree's
/// digest. Whichever got stored first stays, the other one is refused.
#[apply(object_services)]
#[tokio::test]
async fn put_type_collision(object_service: impl ObjectService) {
    let mut contents = vec![ObjectType::Tree as u8];
    contents.extend(proto::TreeNode::from(&*TREE_B).encode_to_vec());
    let blob = Blob::from_contents(&contents);
    assert_eq!(&TREE_B.digest(), blob.digest());

    object_service.put(TREE_B.clone().into()).await.unwrap();
    assert!(matches!(
        object_service.put(blob.clone().into()).await,
        Err(Error::StorageError(_))
    ));
    assert_eq!(
        Ok(TREE_B.clone()),
        object_service.get_tree(&TREE_B.digest()).await
    );

    // and the other way round.
    let mut contents = vec![ObjectType::Tree as u8];
    contents.extend(proto::TreeNode::from(&*TREE_A).encode_to_vec());
    let blob = Blob::from_contents(&contents);
    assert_eq!(&TREE_A.digest(), blob.digest());

    object_service.put(blob.clone().into()).await.unwrap();
    assert!(matches!(
        object_service.put(TREE_A.clone().into()).await,
        Err(Error::StorageError(_))
    ));
    assert_eq!(
        Some(Object::Blob(blob)),
        object_service.get(&TREE_A.digest()).await.unwrap()
    );
}

/// The typed helpers resolve trees, and report missing or mistyped objects.
#[apply(object_services)]
#[tokio::test]
async fn get_tree(object_service: impl ObjectService) {
    // the empty tree is always there.
    assert_eq!(
        Ok(TreeNode::new()),
        object_service.get_tree(&EMPTY_TREE_DIGEST).await
    );

    assert!(matches!(
        object_service.get_tree(&TREE_B.digest()).await,
        Err(Error::NotFound(_))
    ));

    object_service.put(TREE_B.clone().into()).await.unwrap();
    assert_eq!(
        Ok(TREE_B.clone()),
        object_service.get_tree(&TREE_B.digest()).await
    );

    object_service.put(BLOB_A.clone().into()).await.unwrap();
    assert!(matches!(
        object_service.get_tree(BLOB_A.digest()).await,
        Err(Error::StorageError(_))
    ));
    assert!(matches!(
        object_service.get_commit(BLOB_A.digest()).await,
        Err(Error::StorageError(_))
    ));
}
