use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use cloudstack::{sign_url, Credential, Params, RequestSigner};

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloudstack");

    group.bench_function("sign_url", |b| {
        let url = "http://localhost:8080/client/api?listAll=true&name=web+01&command=listVirtualMachines&apiKey=key&response=json";

        b.iter(|| sign_url(url, "s3cr3t").expect("must success"))
    });

    group.bench_function("build_url", |b| {
        let signer = RequestSigner::new(Credential::new("key", "s3cr3t"));
        let params = Params::from([
            ("domainid".to_string(), "1".to_string()),
            ("isrecursive".to_string(), "True".to_string()),
            ("state".to_string(), "Running".to_string()),
            ("listAll".to_string(), "true".to_string()),
            ("page".to_string(), "1".to_string()),
            ("pagesize".to_string(), "500".to_string()),
        ]);

        b.iter(|| {
            signer
                .build_url("http://localhost:8080", "listVirtualMachines", &params)
                .expect("must success")
        })
    });

    group.finish();
}
