use std::io::Cursor;

use portage_core::WireChunk;
use portage_transfer::transport::mem::memory_pair;
use portage_transfer::transport::{ChunkReceiver, ChunkSender};
use portage_transfer::{collect, upload_from, TransferError};

use crate::payload;

/// The receive side disappears before the first send: the uploader
/// reports a send failure and never finalizes its side.
#[tokio::test]
async fn upload_fails_when_receiver_vanishes() {
    let (mut tx, rx) = memory_pair(1);
    drop(rx);

    let err = upload_from(Cursor::new(payload(64 * 1024)), &mut tx)
        .await
        .unwrap_err();
    assert!(matches!(err, TransferError::Send(_)));
}

/// The receive side walks away mid-transfer: the uploader aborts with a
/// send failure instead of finishing.
#[tokio::test]
async fn receiver_dropping_mid_transfer_aborts_upload() {
    let (mut tx, mut rx) = memory_pair(2);

    let uploader =
        tokio::spawn(async move { upload_from(Cursor::new(payload(256 * 1024)), &mut tx).await });

    // Take a few chunks, then walk away
    for _ in 0..3 {
        rx.receive().await.unwrap();
    }
    drop(rx);

    let err = uploader.await.unwrap().unwrap_err();
    assert!(matches!(err, TransferError::Send(_)));
}

/// A sender that skips a chunk: the collector reports the transfer as
/// incomplete rather than returning a gapped group.
#[tokio::test]
async fn gap_is_detected_after_end_of_stream() {
    let (mut tx, mut rx) = memory_pair(8);
    for order in [0u64, 1, 2, 3, 5, 6] {
        tx.send(WireChunk {
            order,
            data: vec![0; 4],
        })
        .await
        .unwrap();
    }
    tx.close().await.unwrap();

    let err = collect(&mut rx).await.unwrap_err();
    assert!(matches!(err, TransferError::IncompleteTransfer));
}

/// The same chunk delivered twice counts as incomplete, not as extra data.
#[tokio::test]
async fn duplicate_is_detected_after_end_of_stream() {
    let (mut tx, mut rx) = memory_pair(8);
    for order in [0u64, 1, 1, 2] {
        tx.send(WireChunk {
            order,
            data: vec![0; 4],
        })
        .await
        .unwrap();
    }
    tx.close().await.unwrap();

    let err = collect(&mut rx).await.unwrap_err();
    assert!(matches!(err, TransferError::IncompleteTransfer));
}
