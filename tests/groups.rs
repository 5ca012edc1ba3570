pub mod support;

use watch_our_movies::{
    db::models::{Group, GroupId, UserId},
    logic::groups::GroupError,
};

use crate::support::registry::create_service;

#[tokio::test]
async fn created_group_is_listed_with_its_members() {
    let (mut gen, service) = create_service().await;
    let alice = gen.generate_user().await;
    let bob = gen.generate_user().await;

    let group = Group {
        id: GroupId::new_v4(),
        name: "Cine club".into(),
        user_ids: vec![bob.id, alice.id],
    };
    let created = service.create_group(group.clone()).await.unwrap();
    assert_eq!(created, group);

    let groups = service.get_all_groups().await.unwrap();
    assert_eq!(groups, vec![group]);
}

#[tokio::test]
async fn group_with_unknown_member_is_rejected_without_writes() {
    let (mut gen, service) = create_service().await;
    let alice = gen.generate_user().await;
    let ghost = UserId(uuid::Uuid::new_v4());

    let err = service
        .create_group(Group {
            id: GroupId::new_v4(),
            name: "Ghosts".into(),
            user_ids: vec![alice.id, ghost],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GroupError::UnknownUser(id) if id == ghost));
    assert_eq!(gen.count_rows("groupe").await, 0);
    assert_eq!(gen.count_rows("group_user").await, 0);
}

#[tokio::test]
async fn each_group_lists_only_its_own_members() {
    let (mut gen, service) = create_service().await;
    let alice = gen.generate_user().await;
    let bob = gen.generate_user().await;
    let carol = gen.generate_user().await;

    let horror = Group {
        id: GroupId::new_v4(),
        name: "Horror".into(),
        user_ids: vec![alice.id, carol.id],
    };
    let comedy = Group {
        id: GroupId::new_v4(),
        name: "Comedy".into(),
        user_ids: vec![bob.id],
    };
    let empty = Group {
        id: GroupId::new_v4(),
        name: "Empty".into(),
        user_ids: vec![],
    };
    for group in [&horror, &comedy, &empty] {
        service.create_group(group.clone()).await.unwrap();
    }

    let groups = service.get_all_groups().await.unwrap();

    assert_eq!(groups, vec![comedy, empty, horror]);
    assert_eq!(gen.count_rows("group_user").await, 3);
}

#[tokio::test]
async fn duplicate_members_are_kept() {
    let (mut gen, service) = create_service().await;
    let alice = gen.generate_user().await;

    let group = Group {
        id: GroupId::new_v4(),
        name: "Solo".into(),
        user_ids: vec![alice.id, alice.id],
    };
    service.create_group(group.clone()).await.unwrap();

    let groups = service.get_all_groups().await.unwrap();
    assert_eq!(groups[0].user_ids, vec![alice.id, alice.id]);
}

#[tokio::test]
async fn reusing_a_group_id_fails_and_keeps_the_first_group() {
    let (mut gen, service) = create_service().await;
    let alice = gen.generate_user().await;
    let bob = gen.generate_user().await;

    let first = Group {
        id: GroupId::new_v4(),
        name: "First".into(),
        user_ids: vec![alice.id],
    };
    service.create_group(first.clone()).await.unwrap();

    let err = service
        .create_group(Group {
            id: first.id,
            name: "Second".into(),
            user_ids: vec![bob.id],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GroupError::DatabaseError(_)));
    assert_eq!(service.get_all_groups().await.unwrap(), vec![first]);
    assert_eq!(gen.count_rows("group_user").await, 1);
}
