/*!

This is the long-form manual for `topsis_ranking` and `topsisrank`.

## The method

`topsis_ranking` ranks a set of alternatives against a set of criteria by
chaining two classical multi-criteria decision analysis algorithms:

1. **Rank Order Centroid (ROC)** converts an ordinal importance ranking of
the criteria into cardinal weights that sum to 1. Ordering the criteria from
the most important to the least important is all the input the method needs:
the criterion at rank `j` out of `n` receives the weight
`(1/n) * (1/j + 1/(j+1) + ... + 1/n)`.

2. **TOPSIS** (Technique for Order Preference by Similarity to Ideal
Solution) scores every alternative by its geometric closeness to an ideal
reference point (the best attainable value on every criterion) and an
anti-ideal point (the worst attainable value on every criterion), in five
stages:

| stage | operation |
|-------|-----------|
| 1     | divide every column by its Euclidean norm |
| 2     | multiply every column by its criterion weight |
| 3     | extract the ideal (A+) and anti-ideal (A-) values per column |
| 4     | compute the Euclidean distance of every alternative to A+ and A- |
| 5     | score `C* = D- / (D+ + D-)`, sort descending, assign ranks |

A *benefit* criterion rewards larger raw values (quality, capacity), a
*cost* criterion rewards smaller raw values (price, latency).

Degenerate inputs are handled with explicit fallback values rather than NaN:
a column whose values are all zero normalizes to zeros, an alternative at
zero distance from both ideals scores 0, and a zero ROC weight total skips
the re-normalization step.

## Configuration

The `topsisrank` program is driven by a JSON configuration file:

```json
{
    "outputSettings": {
        "analysisName": "Laptop purchase",
        "outputPath": null
    },
    "criteria": [
        { "name": "price", "type": "cost" },
        { "name": "quality", "type": "benefit" }
    ],
    "prioritizedCriteria": ["quality", "price"],
    "dataSource": { "provider": "inline" },
    "alternatives": ["laptop A", "laptop B"],
    "values": [[10, 8], [5, 9]]
}
```

The keys:
* `criteria`: the criteria of the decision. `type` must be `benefit` or
  `cost`. The order of this list is the column order of the value matrix.
* `prioritizedCriteria`: the criteria names ordered from the most important
  to the least important. It must mention every declared criterion exactly
  once; an omission is a fatal error rather than a silent zero weight.
* `dataSource.provider`: `inline` or `csv` (see below).
* `alternatives` / `values` (inline provider): the alternative names and the
  raw decision matrix, one row per alternative.

### `csv`

With `"provider": "csv"`, the decision matrix is read from a file instead:

```json
    "dataSource": {
        "provider": "csv",
        "filePath": "laptops.csv",
        "alternativeColumnIndex": 1
    }
```

The file path is resolved relative to the configuration file. The first row
must be a header. The alternative names are taken from the column at
`alternativeColumnIndex` (1-based, defaults to the first column), and each
declared criterion is located by matching its name against the header.
Columns that match no criterion are ignored.

## Output

The result is a JSON summary with the derived weights and the ranking,
printed to the standard output or written to the path given with `--out`
(or `outputSettings.outputPath`):

```json
{
    "config": { "alternatives": 2, "analysis": "Laptop purchase", "criteria": 2 },
    "weights": { "price": 0.25, "quality": 0.75 },
    "ranking": [
        { "alternative": "laptop B", "preference": 1.0, "rank": 1 },
        { "alternative": "laptop A", "preference": 0.0, "rank": 2 }
    ]
}
```

With `--reference <file>`, the produced summary is compared against an
expected summary and any difference is reported as an error. This is how the
test suite validates whole analyses end to end.

*/
