use hashtree::HashTree;

use assert_matches::assert_matches;
use hex_literal::hex;

use crate::{Client, Server, DATA};

#[test]
fn mock() {
    use md5::{Digest, Md5};

    let tree = HashTree::<Md5>::from_leaves(crate::DATA.map(Md5::digest)).unwrap();

    assert_eq!(tree.hash()[..], hex!("2e5f43f00bac63aab14f2d02ce365c7d"));
    assert_eq!(*tree.hash(), *HashTree::<Md5>::build(crate::DATA).unwrap().hash());

    println!("{:x}", tree.hash());
}

#[tokio::test]
async fn backup_and_restore() {
    let mut server = Server::default();
    let mut client = Client::default();

    assert_matches!(server.download_file(0).await, Err("Nothing backed up yet..."));

    let root_hash = client.backup_files(&mut server, DATA.map(Into::into)).await.unwrap();
    assert_eq!(root_hash[..], hex!("2e5f43f00bac63aab14f2d02ce365c7d"));
    client.store_root_hash(root_hash).await;

    for (index, content) in DATA.iter().enumerate() {
        assert_eq!(client.restore_file(&server, index).await.as_deref(), Ok(*content));
        assert!(server.contains_file(&content.to_string()));
    }

    assert!(!server.contains_file(&String::from("HELLO zAMA TEAM")));
    assert_matches!(client.restore_file(&server, DATA.len()).await, Err("File not found..."));

    server.alter_file(1);

    assert_matches!(client.restore_file(&server, 0).await, Ok(_));
    assert_matches!(client.restore_file(&server, 1).await, Err("File is corrupted!"));
    assert_matches!(client.restore_file(&server, 2).await, Ok(_));
}

#[tokio::test]
async fn reject_bad_checksum() {
    use md5::{Digest, Md5};

    let mut server = Server::default();

    let files = vec![(String::from(DATA[0]), Md5::digest(DATA[1]))];
    assert_matches!(server.upload_files(files).await, Err("Upload failed, please retry..."));
    assert_matches!(server.upload_files(vec![]).await, Err("Nothing to back up..."));
}
