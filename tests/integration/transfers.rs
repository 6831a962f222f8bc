use std::io::Cursor;

use anyhow::Result;

use portage_core::TransferConfig;
use portage_transfer::transport::mem::memory_pair;
use portage_transfer::{collect, upload_from, upload_from_with};

use crate::payload;

/// A 100 KiB source at the default chunk size crosses as 25 chunks and
/// reassembles byte-for-byte.
#[tokio::test]
async fn round_trip_default_config() -> Result<()> {
    let data = payload(100 * 1024);
    let (mut tx, mut rx) = memory_pair(32);

    let source = data.clone();
    let uploader = tokio::spawn(async move { upload_from(Cursor::new(source), &mut tx).await });

    let mut group = collect(&mut rx).await?;
    uploader.await??;

    assert_eq!(group.len(), 25);
    assert!(!group.missing_chunks());
    assert_eq!(group.bytes(), data);
    Ok(())
}

/// "foobar" in 2-byte chunks: three chunks, orders 0..2, intact content.
#[tokio::test]
async fn round_trip_tiny_chunks() -> Result<()> {
    let (mut tx, mut rx) = memory_pair(4);
    let config = TransferConfig {
        chunk_size: 2,
        buffer_depth: 1,
    };

    let uploader = tokio::spawn(async move {
        upload_from_with(Cursor::new(b"foobar".to_vec()), &mut tx, config).await
    });

    let mut group = collect(&mut rx).await?;
    uploader.await??;

    assert_eq!(group.len(), 3);
    assert!(!group.missing_chunks());
    assert_eq!(group.bytes(), b"foobar".as_slice());
    Ok(())
}

/// A transfer bigger than the transport's queue depth: backpressure on
/// both queues, still byte-for-byte intact.
#[tokio::test]
async fn round_trip_with_narrow_queues() -> Result<()> {
    let data = payload(64 * 1024 + 123);
    let (mut tx, mut rx) = memory_pair(1);
    let config = TransferConfig {
        chunk_size: 512,
        buffer_depth: 1,
    };

    let source = data.clone();
    let uploader =
        tokio::spawn(async move { upload_from_with(Cursor::new(source), &mut tx, config).await });

    let mut group = collect(&mut rx).await?;
    uploader.await??;

    assert_eq!(group.len(), (data.len() + 511) / 512);
    assert!(!group.missing_chunks());
    assert_eq!(group.bytes(), data);
    Ok(())
}

/// The group's reader view streams the same bytes `bytes()` returns.
#[tokio::test]
async fn reader_streams_the_reassembled_bytes() -> Result<()> {
    use tokio::io::AsyncReadExt;

    let data = payload(3 * 4096 + 17);
    let (mut tx, mut rx) = memory_pair(8);

    let source = data.clone();
    let uploader = tokio::spawn(async move { upload_from(Cursor::new(source), &mut tx).await });

    let mut group = collect(&mut rx).await?;
    uploader.await??;
    assert!(!group.missing_chunks());

    let mut out = Vec::new();
    group.reader().read_to_end(&mut out).await?;
    assert_eq!(out, data);
    Ok(())
}

/// An empty source still completes: zero chunks, a clean close, and an
/// empty validated group.
#[tokio::test]
async fn empty_source_transfers_cleanly() -> Result<()> {
    let (mut tx, mut rx) = memory_pair(1);

    let uploader = tokio::spawn(async move { upload_from(Cursor::new(Vec::new()), &mut tx).await });

    let mut group = collect(&mut rx).await?;
    uploader.await??;

    assert!(group.is_empty());
    assert!(!group.missing_chunks());
    assert!(group.bytes().is_empty());
    Ok(())
}
