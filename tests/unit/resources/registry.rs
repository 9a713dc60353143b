use super::*;
use crate::foundation::time::Time;
use crate::resources::model::MediaKind;

fn video_asset(id: ResourceId, path: &str) -> Asset {
    Asset::new(id, "clip", path, MediaKind::Video, Time::from_seconds(10.0))
}

#[test]
fn reserve_ids_are_sequential_from_r1() {
    let mut reg = Registry::new();
    let ids = reg.reserve_ids(3).unwrap();
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["r1", "r2", "r3"]);
    assert_eq!(reg.issued(), 3);
}

#[test]
fn rolled_back_ids_are_never_reissued() {
    let mut reg = Registry::new();
    {
        let mut tx = Transaction::new(&mut reg);
        let ids = tx.reserve_ids(3).unwrap();
        assert_eq!(ids.last().unwrap().to_string(), "r3");
        tx.rollback().unwrap();
    }
    let mut tx = Transaction::new(&mut reg);
    let ids = tx.reserve_ids(2).unwrap();
    let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["r4", "r5"]);
}

#[test]
fn exhausted_id_space_is_an_error() {
    let mut reg = Registry::new();
    reg.last_issued = u32::MAX - 1;
    assert!(matches!(
        reg.reserve_ids(2),
        Err(FcpxError::IdSpaceExhausted { requested: 2, .. })
    ));
    assert_eq!(reg.issued(), u32::MAX - 1);
    assert_eq!(reg.reserve_ids(1).unwrap(), [ResourceId(u32::MAX)]);
    assert!(reg.reserve_ids(1).is_err());
    assert!(reg.reserve_ids(0).unwrap().is_empty());
}

#[test]
fn dropping_an_open_transaction_discards_staged_resources() {
    let mut reg = Registry::new();
    let staged = {
        let mut tx = Transaction::new(&mut reg);
        let id = tx.reserve_id().unwrap();
        tx.create_format(Format::hd1080p2398(id)).unwrap();
        assert_eq!(tx.state(), TransactionState::Open);
        id
    };
    assert!(reg.is_empty());
    assert!(!reg.contains(staged));
    assert_eq!(reg.issued(), 1);

    let mut tx = Transaction::new(&mut reg);
    let next = tx.reserve_id().unwrap();
    assert_ne!(next, staged);
    assert_eq!(next.to_string(), "r2");
}

#[test]
fn staged_resources_are_invisible_until_commit() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let id = tx.reserve_id().unwrap();
    tx.create_asset(video_asset(id, "/media/a.mov")).unwrap();
    assert!(!tx.registry().contains(id));
    assert!(tx.registry().asset_by_path("/media/a.mov").is_none());
    assert_eq!(tx.pending().len(), 1);

    tx.commit().unwrap();
    drop(tx);
    assert!(reg.contains(id));
    assert_eq!(reg.asset_by_path("/media/a.mov").unwrap().id, id);
}

#[test]
fn rollback_discards_pending_permanently() {
    let mut reg = Registry::new();
    let id = {
        let mut tx = Transaction::new(&mut reg);
        let id = tx.reserve_id().unwrap();
        tx.create_format(Format::hd1080p2398(id)).unwrap();
        tx.rollback().unwrap();
        assert_eq!(tx.state(), TransactionState::RolledBack);
        id
    };
    assert!(reg.get(id).is_none());
    assert!(reg.is_empty());

    let mut tx = Transaction::new(&mut reg);
    let next = tx.reserve_id().unwrap();
    tx.commit().unwrap();
    drop(tx);
    assert_ne!(next, id);
    assert!(!reg.contains(id));
}

#[test]
fn staging_after_rollback_is_transaction_closed() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let id = tx.reserve_id().unwrap();
    tx.rollback().unwrap();

    assert!(matches!(
        tx.reserve_ids(1),
        Err(FcpxError::TransactionClosed { .. })
    ));
    assert!(matches!(
        tx.create_format(Format::hd1080p2398(id)),
        Err(FcpxError::TransactionClosed { .. })
    ));
    assert!(matches!(
        tx.commit(),
        Err(FcpxError::TransactionClosed { .. })
    ));
}

#[test]
fn commit_is_idempotent_and_closes_staging() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let id = tx.reserve_id().unwrap();
    tx.create_format(Format::hd1080p2398(id)).unwrap();
    tx.commit().unwrap();
    tx.commit().unwrap();
    assert!(matches!(
        tx.reserve_id(),
        Err(FcpxError::TransactionClosed { state: "committed" })
    ));
    assert!(tx.rollback().is_err());
    drop(tx);
    assert_eq!(reg.len(), 1);
}

#[test]
fn staging_requires_own_reservation() {
    let mut reg = Registry::new();
    let foreign = reg.reserve_ids(1).unwrap()[0];
    let mut tx = Transaction::new(&mut reg);
    assert!(matches!(
        tx.create_format(Format::hd1080p2398(foreign)),
        Err(FcpxError::UnreservedId(id)) if id == foreign
    ));

    let id = tx.reserve_id().unwrap();
    tx.create_format(Format::hd1080p2398(id)).unwrap();
    assert!(matches!(
        tx.create_format(Format::hd1080p2398(id)),
        Err(FcpxError::DuplicateResource(_))
    ));
}

#[test]
fn definitions_are_sanity_checked() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let ids = tx.reserve_ids(3).unwrap();
    let zero_video = Asset::new(ids[0], "v", "/v.mov", MediaKind::Video, Time::ZERO);
    assert!(matches!(
        tx.create_asset(zero_video),
        Err(FcpxError::Validation(_))
    ));
    let still = Asset::new(ids[1], "s", "/s.png", MediaKind::Image, Time::ZERO);
    tx.create_asset(still).unwrap();
    let mut bad_format = Format::hd1080p2398(ids[2]);
    bad_format.width = 0;
    assert!(tx.create_format(bad_format).is_err());
}

#[test]
fn get_or_create_asset_deduplicates_by_path() {
    let mut reg = Registry::new();
    let first = {
        let mut tx = Transaction::new(&mut reg);
        let (res, existed) = tx
            .get_or_create_asset("/media/a.mov", |id| video_asset(id, "/media/a.mov"))
            .unwrap();
        assert!(!existed);
        let (again, existed) = tx
            .get_or_create_asset("/media/a.mov", |id| video_asset(id, "/media/a.mov"))
            .unwrap();
        assert!(existed);
        assert_eq!(again.id(), res.id());
        tx.commit().unwrap();
        res.id()
    };

    let mut tx = Transaction::new(&mut reg);
    let (res, existed) = tx
        .get_or_create_asset("/media/a.mov", |_| unreachable!("asset already committed"))
        .unwrap();
    assert!(existed);
    assert_eq!(res.id(), first);
    let (other, existed) = tx
        .get_or_create_asset("/media/b.mov", |id| video_asset(id, "/media/b.mov"))
        .unwrap();
    assert!(!existed);
    assert_ne!(other.id(), first);
}

#[test]
fn get_or_create_asset_rejects_mismatched_builder() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let err = tx
        .get_or_create_asset("/media/a.mov", |id| video_asset(id, "/media/other.mov"))
        .unwrap_err();
    assert!(matches!(err, FcpxError::Validation(_)));
    assert!(tx.pending().is_empty());
}

#[test]
fn lookups_by_uid_and_size() {
    let mut reg = Registry::new();
    let mut tx = Transaction::new(&mut reg);
    let ids = tx.reserve_ids(3).unwrap();
    tx.create_format(Format::hd1080p2398(ids[0])).unwrap();
    tx.create_format(Format::still(ids[1], 640, 480)).unwrap();
    tx.create_effect(Effect {
        id: ids[2],
        name: "Basic Title".to_owned(),
        uid: ".../Basic Title.moti".to_owned(),
    })
    .unwrap();
    tx.commit().unwrap();
    drop(tx);

    assert_eq!(reg.format_for_size(1920, 1080).unwrap().id, ids[0]);
    assert!(reg.format_for_size(640, 480).is_none());
    assert_eq!(reg.effect_by_uid(".../Basic Title.moti").unwrap().id, ids[2]);
    assert_eq!(reg.formats().count(), 2);
    assert_eq!(reg.resources()[2].tag(), "effect");
}
