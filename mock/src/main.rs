#![doc(hidden)]

//! A proof-of-concept for the basic use case, mocking the client/server parts.

use std::sync::Arc;

use clap::Parser;
use hashtree::{HashProof, HashTree};
use log::{info, warn};
use md5::{digest::Output, Digest, Md5};

#[cfg(test)]
mod tests;

const DATA: [&str; 3] = [
    "hello Zama team",
    "this is Yoann again",
    "here is some content I'd like to share with you",
];

type File = String;

/// Back some files up on a mocked server, then restore them checking their hash proofs.
#[derive(Debug, Parser)]
struct Args {
    /// Index of the file the server corrupts once the backup is done.
    #[arg(long, default_value_t = 2)]
    corrupt: usize,

    /// Print the hash tree of the server once the backup is done.
    #[arg(long)]
    dump: bool,
}

#[derive(Default)]
struct Server {
    merkle_tree: Option<HashTree<Md5>>,
    uploaded_files: Vec<File>,
}

impl Server {
    async fn upload_files(&mut self, files: Vec<(File, Output<Md5>)>) -> Result<Output<Md5>, &'static str> {
        if files.iter().any(|(content, checksum)| *checksum != Md5::digest(content)) {
            return Err("Upload failed, please retry...");
        }

        for (content, checksum) in files {
            info!("File successfully uploaded (checksum: {checksum:x})");
            self.uploaded_files.push(content);
        }

        let merkle_tree = HashTree::<Md5>::build(&self.uploaded_files).map_err(|_| "Nothing to back up...")?;
        let root_hash = *merkle_tree.hash();
        self.merkle_tree = Some(merkle_tree);

        Ok(root_hash)
    }

    async fn download_file(&self, index: usize) -> Result<(File, HashProof<Md5>), &'static str> {
        let merkle_tree = self.merkle_tree.as_ref().ok_or("Nothing backed up yet...")?;
        let file = self.uploaded_files.get(index).ok_or("File not found...")?;
        let proof = merkle_tree.prove_index(index).map_err(|_| "File not found...")?;

        Ok((file.clone(), proof))
    }

    fn contains_file(&self, content: &File) -> bool {
        self.merkle_tree.as_ref().is_some_and(|merkle_tree| merkle_tree.contains(content))
    }

    fn alter_file(&mut self, index: usize) {
        if index < self.uploaded_files.len() {
            let file = &mut self.uploaded_files[index];
            *file = file
                .chars()
                .map(|c| match c {
                    _ if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
                    _ if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
                    _ => c,
                })
                .collect();

            warn!("Oh noes, file #{index} got corrupted on server side!!!");
        }
    }
}

#[derive(Default)]
struct Client {
    root_hash: Output<Md5>,
}

impl Client {
    async fn store_root_hash(&mut self, root_hash: Output<Md5>) {
        self.root_hash = root_hash;
    }

    async fn backup_files(&self, server: &mut Server, files: impl IntoIterator<Item = File>) -> Result<Output<Md5>, &'static str> {
        let files: Vec<_> = files
            .into_iter()
            .map(|file| {
                let checksum = Md5::digest(&file);
                (file, checksum)
            })
            .collect();

        let merkle_tree = HashTree::<Md5>::from_leaves(files.iter().map(|(_, checksum)| *checksum))
            .map_err(|_| "Nothing to back up...")?;

        match server.upload_files(files).await? {
            root_hash if root_hash == *merkle_tree.hash() => Ok(root_hash),
            _ => Err("Server disagrees on the root hash..."),
        }
    }

    async fn restore_file(&self, server: &Server, index: usize) -> Result<File, &'static str> {
        let (file, proof) = server.download_file(index).await?;

        self.check_file(&file, proof)?;

        Ok(file)
    }

    fn check_file(&self, file: &File, proof: HashProof<Md5>) -> Result<(), &'static str> {
        match proof.verify(Md5::digest(file), &self.root_hash) {
            true => Ok(()),
            false => Err("File is corrupted!"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), &'static str> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut server = Server::default();
    let mut client = Client::default();

    info!("Uploading files for backup...");
    let root_hash = client.backup_files(&mut server, DATA.map(Into::into)).await?;

    info!("Storing local information... (root hash: {root_hash:x})");
    client.store_root_hash(root_hash).await;

    if let Some(merkle_tree) = server.merkle_tree.as_ref().filter(|_| args.dump) {
        print!("{merkle_tree}");
    }

    server.alter_file(args.corrupt);

    let unknown = File::from("this file was never uploaded");
    info!("Is an unknown file backed up? {}", server.contains_file(&unknown));

    let server = Arc::new(server);
    let client = Arc::new(client);

    let restores: Vec<_> = (0..DATA.len() + 1)
        .map(|index| {
            let (server, client) = (Arc::clone(&server), Arc::clone(&client));
            tokio::spawn(async move { (index, client.restore_file(&server, index).await) })
        })
        .collect();

    for restore in restores {
        let (index, res) = restore.await.map_err(|_| "Restoration aborted...")?;
        info!("Restoring file #{index}... {res:?}");
    }

    Ok(())
}
